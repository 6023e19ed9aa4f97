use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::CoreError;

pub const MAX_RATING: f64 = 5.0;
pub const MAX_PRICE_LEVEL: u8 = 4;

/// Which pipeline stage produced a [`RestaurantCandidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Nearby,
    TextVariant,
    Geocode,
    GeocodeBroad,
    /// Hand-authored entry from the static catalog file.
    Catalog,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Nearby => write!(f, "nearby"),
            CandidateSource::TextVariant => write!(f, "text_variant"),
            CandidateSource::Geocode => write!(f, "geocode"),
            CandidateSource::GeocodeBroad => write!(f, "geocode_broad"),
            CandidateSource::Catalog => write!(f, "catalog"),
        }
    }
}

/// A restaurant search result normalized from any upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCandidate {
    /// External place id when known, otherwise `name_lat_lng` rounded to 5 places.
    pub identity: String,
    /// External place id, kept separately so details can be fetched.
    pub place_id: Option<String>,
    pub name: String,
    pub location: Coordinate,
    /// In `[0, 5]`; `0` means unrated.
    pub rating: f64,
    /// In `[0, 4]`; `0` means unknown.
    pub price_level: u8,
    /// Defaults to `true` when the source does not say.
    pub is_open_now: bool,
    /// Only the static catalog knows about parking.
    pub has_parking: Option<bool>,
    pub address: String,
    pub categories: Vec<String>,
    pub source: CandidateSource,
}

/// Identity key for records without an external id.
///
/// Two venues sharing a name and near-identical coordinates collapse into one
/// key; this is accepted.
#[must_use]
pub fn derive_identity(name: &str, location: Coordinate) -> String {
    format!("{name}_{:.5}_{:.5}", location.latitude, location.longitude)
}

/// Clamp a raw rating into `[0, 5]`, mapping missing or NaN to `0`.
#[must_use]
pub fn clamp_rating(raw: Option<f64>) -> f64 {
    match raw {
        Some(r) if r.is_finite() => r.clamp(0.0, MAX_RATING),
        _ => 0.0,
    }
}

/// Clamp a raw price level into `[0, 4]`, mapping missing to `0`.
#[must_use]
// Range-checked by the clamp, so the cast cannot truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_price_level(raw: Option<i64>) -> u8 {
    match raw {
        Some(level) => level.clamp(0, i64::from(MAX_PRICE_LEVEL)) as u8,
        None => 0,
    }
}

/// User-facing budget brackets, keyed as `under100`, `100-300`, `300-500`, `over500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "under100")]
    Under100,
    #[serde(rename = "100-300")]
    From100To300,
    #[serde(rename = "300-500")]
    From300To500,
    #[serde(rename = "over500")]
    Over500,
}

impl BudgetBracket {
    /// Inclusive `(min, max)` price-level range accepted by this bracket.
    #[must_use]
    pub const fn price_level_range(self) -> (u8, u8) {
        match self {
            BudgetBracket::Under100 => (0, 1),
            BudgetBracket::From100To300 => (1, 2),
            BudgetBracket::From300To500 => (2, 3),
            BudgetBracket::Over500 => (3, 4),
        }
    }

    #[must_use]
    pub fn accepts(self, price_level: u8) -> bool {
        let (min, max) = self.price_level_range();
        (min..=max).contains(&price_level)
    }
}

impl std::fmt::Display for BudgetBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetBracket::Under100 => write!(f, "under100"),
            BudgetBracket::From100To300 => write!(f, "100-300"),
            BudgetBracket::From300To500 => write!(f, "300-500"),
            BudgetBracket::Over500 => write!(f, "over500"),
        }
    }
}

impl FromStr for BudgetBracket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "under100" | "under_100" => Ok(BudgetBracket::Under100),
            "100-300" | "100_300" => Ok(BudgetBracket::From100To300),
            "300-500" | "300_500" => Ok(BudgetBracket::From300To500),
            "over500" | "over_500" => Ok(BudgetBracket::Over500),
            other => Err(CoreError::InvalidBudgetBracket(other.to_string())),
        }
    }
}

/// Independently toggled constraints applied to the candidate set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub budget_bracket: Option<BudgetBracket>,
    pub min_rating: Option<f64>,
    pub open_now_only: bool,
    pub has_parking_only: bool,
    pub search_text: Option<String>,
}

impl FilterCriteria {
    /// Select a budget bracket; selecting the active one again clears it.
    pub fn select_budget(&mut self, bracket: BudgetBracket) {
        self.budget_bracket = if self.budget_bracket == Some(bracket) {
            None
        } else {
            Some(bracket)
        };
    }

    /// Select a minimum rating; selecting the active one again clears it.
    pub fn select_min_rating(&mut self, rating: f64) {
        #[allow(clippy::float_cmp)]
        let same = self.min_rating == Some(rating);
        self.min_rating = if same { None } else { Some(rating) };
    }

    pub fn toggle_open_now(&mut self) {
        self.open_now_only = !self.open_now_only;
    }

    pub fn toggle_parking(&mut self) {
        self.has_parking_only = !self.has_parking_only;
    }

    /// Set the free-text filter; blank text clears it.
    pub fn set_search_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.search_text = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Returns `true` if no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.budget_bracket.is_none()
            && self.min_rating.is_none()
            && !self.open_now_only
            && !self.has_parking_only
            && self
                .search_text
                .as_deref()
                .is_none_or(|t| t.trim().is_empty())
    }
}
