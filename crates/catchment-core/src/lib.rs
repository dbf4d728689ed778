//! Domain core for the outlet catchment map.
//!
//! Holds the outlet record, great-circle geometry, pairwise catchment overlap
//! detection, query-intent classification, and environment configuration.
//! Nothing in this crate performs I/O apart from reading the process
//! environment in [`load_app_config`].

pub mod app_config;
pub mod config;
pub mod geo;
pub mod outlet;
pub mod overlap;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_m, LatLng, EARTH_RADIUS_M};
pub use outlet::{LocationSummary, Outlet};
pub use overlap::{
    detect_overlaps, CatchmentCircle, CircleStyle, OverlapAnnotation,
    CATCHMENT_RADIUS_M, CATCHMENT_STYLE, HIGHLIGHT_STYLE,
};
pub use query::{classify, extract_location, winning_rule, QueryIntent, QueryRule, QUERY_RULES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
