//! Tiered fallback search.
//!
//! Tries strategies in order and returns the first tier that produces
//! candidates:
//!
//! 1. Several text-search variants of the query, dispatched concurrently and
//!    joined before scoring.
//! 2. A geocoding query near the map center, restricted to the viewport or,
//!    failing that, to the nearest few results within a cutoff.
//! 3. A geocoding query broadened with a region qualifier.
//!
//! Upstream errors are logged and treated as empty answers. Only an empty
//! query or three empty tiers reach the caller as non-success outcomes.

use std::time::Duration;

use futures::future::join_all;
use gogoeat_core::{
    distance_km, AppConfig, Bounds, CandidateSource, Coordinate, RestaurantCandidate,
};

use crate::dedupe::dedupe;
use crate::normalize::{normalize_geocode, normalize_place};
use crate::provider::{MapView, PlacesProvider};
use crate::rank::{rank, RankConfig};

/// Tuning for [`SearchOrchestrator`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub search_radius_m: u32,
    pub nearby_radius_m: u32,
    /// Country restriction for geocoding, e.g. `"TW"`.
    pub region: String,
    pub locale_hint: String,
    pub category_hint: String,
    pub broad_hint: String,
    pub rank: RankConfig,
    pub geocode_cutoff_km: f64,
    pub geocode_nearest_k: usize,
    pub broad_cap: usize,
    /// Dispatch offset between consecutive text-search variants.
    pub variant_stagger: Duration,
}

impl SearchSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            search_radius_m: config.search_radius_m,
            nearby_radius_m: config.nearby_radius_m,
            region: config.region.clone(),
            locale_hint: config.locale_hint.clone(),
            category_hint: config.category_hint.clone(),
            broad_hint: config.broad_hint.clone(),
            rank: RankConfig {
                max_radius_km: config.rank_max_radius_km,
                outside_cap: config.rank_outside_cap,
                total_cap: config.rank_total_cap,
            },
            geocode_cutoff_km: config.geocode_cutoff_km,
            geocode_nearest_k: config.geocode_nearest_k,
            broad_cap: config.broad_cap,
            variant_stagger: Duration::from_millis(config.variant_stagger_ms),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_radius_m: 2000,
            nearby_radius_m: 2000,
            region: "TW".to_string(),
            locale_hint: "台北".to_string(),
            category_hint: "restaurant".to_string(),
            broad_hint: "台灣".to_string(),
            rank: RankConfig::default(),
            geocode_cutoff_km: 10.0,
            geocode_nearest_k: 5,
            broad_cap: 10,
            variant_stagger: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    TextVariants,
    Geocode,
    BroadGeocode,
}

impl std::fmt::Display for SearchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchTier::TextVariants => write!(f, "text_variants"),
            SearchTier::Geocode => write!(f, "geocode"),
            SearchTier::BroadGeocode => write!(f, "broad_geocode"),
        }
    }
}

/// Result of [`SearchOrchestrator::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// `tier` produced results. `candidates` may still be empty when every
    /// text-search hit lay beyond the ranking radius.
    Found {
        tier: SearchTier,
        candidates: Vec<RestaurantCandidate>,
    },
    /// Every tier came back empty.
    AllTiersExhausted,
    /// The query was empty or whitespace; nothing was dispatched.
    InputRejected,
}

impl SearchOutcome {
    #[must_use]
    pub fn candidates(&self) -> &[RestaurantCandidate] {
        match self {
            SearchOutcome::Found { candidates, .. } => candidates,
            SearchOutcome::AllTiersExhausted | SearchOutcome::InputRejected => &[],
        }
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<RestaurantCandidate> {
        match self {
            SearchOutcome::Found { candidates, .. } => candidates,
            SearchOutcome::AllTiersExhausted | SearchOutcome::InputRejected => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchOutcome::AllTiersExhausted)
    }
}

pub struct SearchOrchestrator<P, M> {
    provider: P,
    map: M,
    settings: SearchSettings,
}

impl<P, M> SearchOrchestrator<P, M>
where
    P: PlacesProvider,
    M: MapView,
{
    pub fn new(provider: P, map: M, settings: SearchSettings) -> Self {
        Self {
            provider,
            map,
            settings,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Text-search variants for `query`: as typed, with the locale hint, and
    /// with the category hint.
    #[must_use]
    pub fn query_variants(&self, query: &str) -> Vec<String> {
        vec![
            query.to_string(),
            format!("{query} {}", self.settings.locale_hint),
            format!("{query} {}", self.settings.category_hint),
        ]
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("rejecting empty search query");
            return SearchOutcome::InputRejected;
        }

        let center = self.map.current_center();
        let viewport = self.map.current_viewport();

        if let Some(candidates) = self.text_variants_tier(query, center, &viewport).await {
            return found(SearchTier::TextVariants, query, candidates);
        }
        tracing::debug!(query, "text search empty, falling back to geocoding");

        let candidates = self.geocode_tier(query, center, &viewport).await;
        if !candidates.is_empty() {
            return found(SearchTier::Geocode, query, candidates);
        }
        tracing::debug!(query, "geocoding empty, trying broadened geocoding");

        let candidates = self.broad_geocode_tier(query).await;
        if !candidates.is_empty() {
            return found(SearchTier::BroadGeocode, query, candidates);
        }

        tracing::info!(query, "no results in any search tier");
        SearchOutcome::AllTiersExhausted
    }

    /// Restaurants around `center`, used to populate the map before any
    /// query is typed. Errors yield an empty list.
    pub async fn nearby(&self, center: Coordinate) -> Vec<RestaurantCandidate> {
        match self
            .provider
            .nearby_search(
                center,
                self.settings.nearby_radius_m,
                Some(self.settings.category_hint.as_str()),
            )
            .await
        {
            Ok(places) => dedupe(
                places
                    .iter()
                    .filter_map(|p| normalize_place(p, CandidateSource::Nearby)),
            ),
            Err(e) => {
                tracing::warn!(%center, error = %e, "nearby search failed");
                Vec::new()
            }
        }
    }

    /// Returns `None` when the merged set is empty, so the next tier runs.
    async fn text_variants_tier(
        &self,
        query: &str,
        center: Coordinate,
        viewport: &Bounds,
    ) -> Option<Vec<RestaurantCandidate>> {
        let variants = self.query_variants(query);
        let stagger = self.settings.variant_stagger;
        let radius_m = self.settings.search_radius_m;

        let sub_queries = variants.iter().zip(0u32..).map(|(variant, index)| async move {
            let delay = stagger.saturating_mul(index);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = self.provider.text_search(variant, center, radius_m).await;
            (variant, result)
        });

        // Barrier: every variant settles before the tier is scored.
        let settled = join_all(sub_queries).await;

        let mut merged = Vec::new();
        for (variant, result) in settled {
            match result {
                Ok(places) => {
                    tracing::debug!(
                        variant = %variant,
                        count = places.len(),
                        "text-search variant settled"
                    );
                    merged.extend(
                        places
                            .iter()
                            .filter_map(|p| normalize_place(p, CandidateSource::TextVariant)),
                    );
                }
                Err(e) => {
                    tracing::warn!(variant = %variant, error = %e, "text-search variant failed");
                }
            }
        }

        let unique = dedupe(merged);
        if unique.is_empty() {
            return None;
        }
        tracing::debug!(query, count = unique.len(), "merged text-search results");
        Some(rank(unique, center, viewport, &self.settings.rank))
    }

    async fn geocode_tier(
        &self,
        query: &str,
        center: Coordinate,
        viewport: &Bounds,
    ) -> Vec<RestaurantCandidate> {
        let address = format!("{query} near {center}");
        let raw = match self
            .provider
            .geocode(&address, &self.settings.region, Some(*viewport))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(query, error = %e, "geocoding failed");
                return Vec::new();
            }
        };

        let candidates = dedupe(
            raw.iter()
                .filter_map(|r| normalize_geocode(r, query, CandidateSource::Geocode)),
        );

        let (inside, outside): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| viewport.contains(c.location));
        if !inside.is_empty() {
            return inside;
        }

        let mut nearest: Vec<(f64, RestaurantCandidate)> = outside
            .into_iter()
            .map(|c| (distance_km(c.location, center), c))
            .filter(|(km, _)| *km <= self.settings.geocode_cutoff_km)
            .collect();
        nearest.sort_by(|a, b| a.0.total_cmp(&b.0));
        nearest.truncate(self.settings.geocode_nearest_k);
        tracing::debug!(
            query,
            count = nearest.len(),
            "no geocoding results in viewport, using nearest within cutoff"
        );
        nearest.into_iter().map(|(_, c)| c).collect()
    }

    async fn broad_geocode_tier(&self, query: &str) -> Vec<RestaurantCandidate> {
        let address = format!("{query} {}", self.settings.broad_hint);
        match self
            .provider
            .geocode(&address, &self.settings.region, None)
            .await
        {
            Ok(raw) => {
                let mut candidates = dedupe(
                    raw.iter().filter_map(|r| {
                        normalize_geocode(r, query, CandidateSource::GeocodeBroad)
                    }),
                );
                candidates.truncate(self.settings.broad_cap);
                candidates
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "broadened geocoding failed");
                Vec::new()
            }
        }
    }
}

fn found(tier: SearchTier, query: &str, candidates: Vec<RestaurantCandidate>) -> SearchOutcome {
    tracing::info!(query, %tier, count = candidates.len(), "search tier succeeded");
    SearchOutcome::Found { tier, candidates }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
