pub mod distance;
pub mod filter;
pub mod point;

pub use distance::{distance_meters, haversine_meters, EARTH_RADIUS_M};
pub use filter::filter_within;
pub use point::GeoPoint;
