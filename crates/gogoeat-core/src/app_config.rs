use std::path::PathBuf;

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    /// Used when the user's own location is unavailable.
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub viewport_width_px: u32,
    pub viewport_height_px: u32,
    pub search_radius_m: u32,
    pub nearby_radius_m: u32,
    /// Country restriction for geocoding, e.g. `"TW"`.
    pub region: String,
    pub locale_hint: String,
    pub category_hint: String,
    pub broad_hint: String,
    pub rank_max_radius_km: f64,
    pub rank_outside_cap: usize,
    pub rank_total_cap: usize,
    pub geocode_cutoff_km: f64,
    pub geocode_nearest_k: usize,
    pub broad_cap: usize,
    pub variant_stagger_ms: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub catalog_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("maps_base_url", &self.maps_base_url)
            .field("default_center", &self.default_center)
            .field("default_zoom", &self.default_zoom)
            .field("viewport_width_px", &self.viewport_width_px)
            .field("viewport_height_px", &self.viewport_height_px)
            .field("search_radius_m", &self.search_radius_m)
            .field("nearby_radius_m", &self.nearby_radius_m)
            .field("region", &self.region)
            .field("locale_hint", &self.locale_hint)
            .field("category_hint", &self.category_hint)
            .field("broad_hint", &self.broad_hint)
            .field("rank_max_radius_km", &self.rank_max_radius_km)
            .field("rank_outside_cap", &self.rank_outside_cap)
            .field("rank_total_cap", &self.rank_total_cap)
            .field("geocode_cutoff_km", &self.geocode_cutoff_km)
            .field("geocode_nearest_k", &self.geocode_nearest_k)
            .field("broad_cap", &self.broad_cap)
            .field("variant_stagger_ms", &self.variant_stagger_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("catalog_path", &self.catalog_path)
            .finish()
    }
}
