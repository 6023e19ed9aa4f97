//! Hand-authored restaurant catalog.
//!
//! The catalog is the only data source that records parking availability and
//! dollar price ranges. Entries convert into [`RestaurantCandidate`]s with
//! source [`CandidateSource::Catalog`] so the same filters apply to them as to
//! live search results.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::restaurants::{derive_identity, CandidateSource, RestaurantCandidate, MAX_RATING};
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    /// Dollar range as displayed, e.g. `"$150-300"`.
    pub price_range: String,
    pub category: String,
    pub phone: Option<String>,
    pub address: String,
    pub hours: Option<String>,
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default)]
    pub has_parking: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogEntry {
    /// Upper bound of the dollar price range (`"$150-300"` → `300`).
    #[must_use]
    pub fn price_upper_bound(&self) -> Option<u32> {
        let upper = self
            .price_range
            .rsplit('-')
            .next()?
            .trim()
            .trim_start_matches('$')
            .replace(',', "");
        upper.parse().ok()
    }

    /// Map the dollar range onto the 0–4 price-level scale used by live results.
    #[must_use]
    pub fn price_level(&self) -> u8 {
        match self.price_upper_bound() {
            None => 0,
            Some(0..=100) => 1,
            Some(101..=300) => 2,
            Some(301..=500) => 3,
            Some(_) => 4,
        }
    }

    #[must_use]
    pub fn to_candidate(&self) -> RestaurantCandidate {
        let location = Coordinate::new(self.lat, self.lng);
        RestaurantCandidate {
            identity: derive_identity(&self.name, location),
            place_id: None,
            name: self.name.clone(),
            location,
            rating: self.rating,
            price_level: self.price_level(),
            is_open_now: self.is_open,
            has_parking: Some(self.has_parking),
            address: self.address.clone(),
            categories: vec![self.category.clone()],
            source: CandidateSource::Catalog,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub restaurants: Vec<CatalogEntry>,
}

impl CatalogFile {
    #[must_use]
    pub fn candidates(&self) -> Vec<RestaurantCandidate> {
        self.restaurants
            .iter()
            .map(CatalogEntry::to_candidate)
            .collect()
    }
}

/// Load and validate the restaurant catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for entry in &catalog.restaurants {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "restaurant name must be non-empty".to_string(),
            ));
        }

        if !(0.0..=MAX_RATING).contains(&entry.rating) {
            return Err(ConfigError::Validation(format!(
                "restaurant '{}' has invalid rating {}; must be within 0-5",
                entry.name, entry.rating
            )));
        }

        if !(-90.0..=90.0).contains(&entry.lat) || !(-180.0..=180.0).contains(&entry.lng) {
            return Err(ConfigError::Validation(format!(
                "restaurant '{}' has out-of-range coordinates ({}, {})",
                entry.name, entry.lat, entry.lng
            )));
        }

        if entry.price_upper_bound().is_none() {
            return Err(ConfigError::Validation(format!(
                "restaurant '{}' has unparsable price range '{}'",
                entry.name, entry.price_range
            )));
        }

        if !seen_names.insert(entry.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate restaurant name: '{}'",
                entry.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, price_range: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            lat: 25.0330,
            lng: 121.5654,
            rating: 4.5,
            price_range: price_range.to_string(),
            category: "台式料理".to_string(),
            phone: None,
            address: "台北市大安區".to_string(),
            hours: None,
            is_open: true,
            has_parking: true,
        }
    }

    #[test]
    fn price_range_maps_to_levels() {
        assert_eq!(entry("a", "$50-100").price_level(), 1);
        assert_eq!(entry("a", "$150-300").price_level(), 2);
        assert_eq!(entry("a", "$200-500").price_level(), 3);
        assert_eq!(entry("a", "$500-1,200").price_level(), 4);
        assert_eq!(entry("a", "market price").price_level(), 0);
    }

    #[test]
    fn to_candidate_carries_parking_and_source() {
        let c = entry("阿明牛肉麵", "$150-300").to_candidate();
        assert_eq!(c.has_parking, Some(true));
        assert_eq!(c.source, CandidateSource::Catalog);
        assert_eq!(c.categories, vec!["台式料理".to_string()]);
        assert!(c.place_id.is_none());
        assert_eq!(c.identity, "阿明牛肉麵_25.03300_121.56540");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let catalog = CatalogFile {
            restaurants: vec![entry("  ", "$100-200")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_bad_rating() {
        let mut e = entry("Pizza", "$100-200");
        e.rating = 6.0;
        let err = validate_catalog(&CatalogFile {
            restaurants: vec![e],
        })
        .unwrap_err();
        assert!(err.to_string().contains("invalid rating"));
    }

    #[test]
    fn validate_rejects_unparsable_price_range() {
        let err = validate_catalog(&CatalogFile {
            restaurants: vec![entry("Pizza", "ask the chef")],
        })
        .unwrap_err();
        assert!(err.to_string().contains("price range"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let err = validate_catalog(&CatalogFile {
            restaurants: vec![entry("Ramen", "$100-200"), entry("ramen", "$100-200")],
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate restaurant name"));
    }

    #[test]
    fn load_catalog_from_repo_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("catalog.yaml");
        let result = load_catalog(&path);
        assert!(result.is_ok(), "failed to load catalog.yaml: {result:?}");
        let catalog = result.unwrap();
        assert_eq!(catalog.restaurants.len(), 3);
        assert!(catalog.candidates().iter().any(|c| c.has_parking == Some(false)));
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
    }
}
