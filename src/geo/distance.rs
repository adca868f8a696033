use crate::error::GeoError;
use crate::geo::GeoPoint;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two validated points (haversine)
///
/// Exactly 0 for identical points and symmetric in its arguments. The
/// intermediate term is clamped so antipodal points cannot produce NaN.
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    // abs() keeps the result bit-identical when the arguments are swapped
    let d_lat = (b.latitude() - a.latitude()).abs().to_radians();
    let d_lon = (b.longitude() - a.longitude()).abs().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance in meters between two raw coordinate pairs
///
/// Fails with `InvalidCoordinate` when either pair is out of range.
pub fn distance_meters(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> Result<f64, GeoError> {
    let a = GeoPoint::new(latitude_1, longitude_1)?;
    let b = GeoPoint::new(latitude_2, longitude_2)?;
    Ok(haversine_meters(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn identical_points_are_zero() {
        for (lat, lon) in [(0.0, 0.0), (23.0225, 72.5714), (-90.0, 180.0), (89.9, -179.9)] {
            assert_eq!(haversine_meters(point(lat, lon), point(lat, lon)), 0.0);
        }
    }

    #[test]
    fn symmetric() {
        let pairs = [
            (point(23.0225, 72.5714), point(23.0300, 72.5800)),
            (point(-33.87, 151.21), point(51.5, -0.12)),
            (point(0.0, -179.9), point(0.0, 179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_meters(a, b), haversine_meters(b, a));
        }
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_meters(point(0.0, 0.0), point(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - PI * EARTH_RADIUS_M).abs() < 1e-3);

        let poles = haversine_meters(point(90.0, 0.0), point(-90.0, 0.0));
        assert!((poles - PI * EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2 * PI * R / 360
        let d = haversine_meters(point(10.0, 20.0), point(11.0, 20.0));
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(
            distance_meters(200.0, 72.0, 23.0, 72.0),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(distance_meters(23.0, 72.0, 23.0, 181.0).is_err());
        assert!(distance_meters(23.0, 72.0, 23.0, 72.0).is_ok());
    }
}
