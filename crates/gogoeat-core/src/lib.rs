//! Domain types, geometry, catalog, and configuration for GOGOEAT.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod restaurants;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogEntry, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{
    distance, distance_km, format_distance, viewport_for_zoom, Bounds, Coordinate, DistanceUnit,
};
pub use restaurants::{
    clamp_price_level, clamp_rating, derive_identity, BudgetBracket, CandidateSource,
    FilterCriteria, RestaurantCandidate, MAX_RATING,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid budget bracket '{0}': expected under100, 100-300, 300-500, or over500")]
    InvalidBudgetBracket(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
