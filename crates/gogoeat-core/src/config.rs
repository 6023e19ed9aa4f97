use crate::app_config::{AppConfig, Environment};
use crate::geo::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::str::FromStr;

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    }

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        parse_as(var, &or_default(var, default))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        parse_as(var, &or_default(var, default))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_as(var, &or_default(var, default))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        parse_as(var, &or_default(var, default))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value: f64 = parse_as(var, &or_default(var, default))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is not a finite number"),
            })
        }
    };

    let env = parse_environment(&or_default("GOGOEAT_ENV", "development"))?;
    let log_level = or_default("GOGOEAT_LOG_LEVEL", "info");
    let maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let maps_base_url = or_default(
        "GOGOEAT_MAPS_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );

    let default_lat = parse_f64("GOGOEAT_DEFAULT_LAT", "25.0330")?;
    let default_lng = parse_f64("GOGOEAT_DEFAULT_LNG", "121.5654")?;
    if !(-90.0..=90.0).contains(&default_lat) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GOGOEAT_DEFAULT_LAT".to_string(),
            reason: format!("latitude {default_lat} outside -90..=90"),
        });
    }
    if !(-180.0..=180.0).contains(&default_lng) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GOGOEAT_DEFAULT_LNG".to_string(),
            reason: format!("longitude {default_lng} outside -180..=180"),
        });
    }

    let default_zoom = parse_u8("GOGOEAT_DEFAULT_ZOOM", "15")?;
    if default_zoom > 22 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GOGOEAT_DEFAULT_ZOOM".to_string(),
            reason: format!("zoom {default_zoom} outside 0..=22"),
        });
    }
    let viewport_width_px = parse_u32("GOGOEAT_VIEWPORT_WIDTH_PX", "1280")?;
    let viewport_height_px = parse_u32("GOGOEAT_VIEWPORT_HEIGHT_PX", "800")?;

    let search_radius_m = parse_u32("GOGOEAT_SEARCH_RADIUS_M", "2000")?;
    let nearby_radius_m = parse_u32("GOGOEAT_NEARBY_RADIUS_M", "2000")?;
    let region = or_default("GOGOEAT_REGION", "TW");
    let locale_hint = or_default("GOGOEAT_LOCALE_HINT", "台北");
    let category_hint = or_default("GOGOEAT_CATEGORY_HINT", "restaurant");
    let broad_hint = or_default("GOGOEAT_BROAD_HINT", "台灣");

    let rank_max_radius_km = parse_f64("GOGOEAT_RANK_MAX_RADIUS_KM", "15")?;
    let rank_outside_cap = parse_usize("GOGOEAT_RANK_OUTSIDE_CAP", "10")?;
    let rank_total_cap = parse_usize("GOGOEAT_RANK_TOTAL_CAP", "20")?;
    let geocode_cutoff_km = parse_f64("GOGOEAT_GEOCODE_CUTOFF_KM", "10")?;
    let geocode_nearest_k = parse_usize("GOGOEAT_GEOCODE_NEAREST_K", "5")?;
    let broad_cap = parse_usize("GOGOEAT_BROAD_CAP", "10")?;
    let variant_stagger_ms = parse_u64("GOGOEAT_VARIANT_STAGGER_MS", "100")?;

    let request_timeout_secs = parse_u64("GOGOEAT_REQUEST_TIMEOUT_SECS", "10")?;
    let max_retries = parse_u32("GOGOEAT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("GOGOEAT_RETRY_BACKOFF_BASE_MS", "500")?;

    let catalog_path = PathBuf::from(or_default("GOGOEAT_CATALOG_PATH", "./config/catalog.yaml"));

    Ok(AppConfig {
        env,
        log_level,
        maps_api_key,
        maps_base_url,
        default_center: Coordinate::new(default_lat, default_lng),
        default_zoom,
        viewport_width_px,
        viewport_height_px,
        search_radius_m,
        nearby_radius_m,
        region,
        locale_hint,
        category_hint,
        broad_hint,
        rank_max_radius_km,
        rank_outside_cap,
        rank_total_cap,
        geocode_cutoff_km,
        geocode_nearest_k,
        broad_cap,
        variant_stagger_ms,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        catalog_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GOGOEAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
