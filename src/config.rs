use crate::geo::GeoPoint;
use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Where the radius filter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoStrategy {
    /// Fetch everything and filter locally
    #[default]
    ClientSide,
    /// Ask the listing service's radius RPC, when the source has one
    ServerRadius,
}

impl FromStr for GeoStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "client" | "client-side" => Ok(GeoStrategy::ClientSide),
            "server" | "server-radius" | "rpc" => Ok(GeoStrategy::ServerRadius),
            other => Err(anyhow!("unknown geo strategy: {other}")),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub radius_rpc_path: String,
    pub request_timeout_secs: u64,
    pub geo_strategy: GeoStrategy,
    /// Map center when no location is given (central Ahmedabad)
    pub default_center: GeoPoint,
    pub default_radius_m: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            radius_rpc_path: "/rpc/hostels_within_radius".to_string(),
            request_timeout_secs: 30,
            geo_strategy: GeoStrategy::ClientSide,
            default_center: AHMEDABAD,
            default_radius_m: 5000.0,
        }
    }
}

/// Central Ahmedabad
const AHMEDABAD: GeoPoint = GeoPoint::new_unchecked(23.0225, 72.5714);

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        let center_lat = parse_var("HOSTEL_SCOUT_CENTER_LAT", defaults.default_center.latitude())?;
        let center_long = parse_var("HOSTEL_SCOUT_CENTER_LONG", defaults.default_center.longitude())?;
        let default_center = GeoPoint::new(center_lat, center_long)
            .context("HOSTEL_SCOUT_CENTER_LAT/LONG must be a valid coordinate")?;

        let default_radius_m = parse_var("HOSTEL_SCOUT_RADIUS_M", defaults.default_radius_m)?;
        if !(default_radius_m.is_finite() && default_radius_m >= 0.0) {
            anyhow::bail!("HOSTEL_SCOUT_RADIUS_M must be a non-negative number");
        }

        Ok(Self {
            api_base_url: env::var("HOSTEL_SCOUT_API_URL").unwrap_or(defaults.api_base_url),
            radius_rpc_path: env::var("HOSTEL_SCOUT_RADIUS_RPC").unwrap_or(defaults.radius_rpc_path),
            request_timeout_secs: parse_var("HOSTEL_SCOUT_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            geo_strategy: parse_var("HOSTEL_SCOUT_GEO_STRATEGY", defaults.geo_strategy)?,
            default_center,
            default_radius_m,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow!("{name} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
