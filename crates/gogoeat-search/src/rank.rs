//! Distance ranking with an on-screen preference.
//!
//! Candidates inside the viewport come first, nearest first. Candidates off
//! screen follow, also nearest first, truncated to a cap. Anything beyond the
//! maximum radius from the reference point is dropped from both groups, and
//! the merged list is truncated to a total cap.

use gogoeat_core::{distance_km, Bounds, Coordinate, RestaurantCandidate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankConfig {
    pub max_radius_km: f64,
    /// How many off-screen candidates survive.
    pub outside_cap: usize,
    /// Length limit of the merged list.
    pub total_cap: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            max_radius_km: 15.0,
            outside_cap: 10,
            total_cap: 20,
        }
    }
}

#[must_use]
pub fn rank(
    candidates: Vec<RestaurantCandidate>,
    reference: Coordinate,
    viewport: &Bounds,
    config: &RankConfig,
) -> Vec<RestaurantCandidate> {
    let mut inside = Vec::new();
    let mut outside = Vec::new();

    for candidate in candidates {
        let km = distance_km(candidate.location, reference);
        if km.is_nan() || km > config.max_radius_km {
            continue;
        }
        if viewport.contains(candidate.location) {
            inside.push((km, candidate));
        } else {
            outside.push((km, candidate));
        }
    }

    inside.sort_by(|a, b| a.0.total_cmp(&b.0));
    outside.sort_by(|a, b| a.0.total_cmp(&b.0));
    outside.truncate(config.outside_cap);

    tracing::debug!(
        inside = inside.len(),
        outside = outside.len(),
        "ranked candidates"
    );

    inside
        .into_iter()
        .chain(outside)
        .take(config.total_cap)
        .map(|(_, candidate)| candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use gogoeat_core::CandidateSource;

    use super::*;

    const CENTER: Coordinate = Coordinate::new(25.033, 121.5654);

    fn viewport() -> Bounds {
        Bounds::new(Coordinate::new(25.02, 121.55), Coordinate::new(25.05, 121.58))
    }

    fn at(identity: &str, lat: f64, lng: f64) -> RestaurantCandidate {
        RestaurantCandidate {
            identity: identity.to_string(),
            place_id: None,
            name: identity.to_string(),
            location: Coordinate::new(lat, lng),
            rating: 0.0,
            price_level: 0,
            is_open_now: true,
            has_parking: None,
            address: String::new(),
            categories: Vec::new(),
            source: CandidateSource::TextVariant,
        }
    }

    fn ids(candidates: &[RestaurantCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.identity.as_str()).collect()
    }

    #[test]
    fn inside_viewport_always_precedes_outside() {
        let out = rank(
            vec![
                // Just outside the viewport but closer than the far inside one.
                at("out-near", 25.033, 121.581),
                at("in-far", 25.049, 121.579),
                at("in-near", 25.034, 121.566),
            ],
            CENTER,
            &viewport(),
            &RankConfig::default(),
        );
        assert_eq!(ids(&out), ["in-near", "in-far", "out-near"]);
    }

    #[test]
    fn drops_candidates_beyond_max_radius() {
        let config = RankConfig::default();
        let out = rank(
            vec![at("kaohsiung", 22.6273, 120.3014), at("near", 25.06, 121.6)],
            CENTER,
            &viewport(),
            &config,
        );
        assert_eq!(ids(&out), ["near"]);
        assert!(out
            .iter()
            .all(|c| distance_km(c.location, CENTER) <= config.max_radius_km));
    }

    #[test]
    fn outside_partition_is_capped() {
        let config = RankConfig {
            max_radius_km: 15.0,
            outside_cap: 2,
            total_cap: 20,
        };
        let out = rank(
            vec![
                at("o3", 25.10, 121.5654),
                at("o1", 25.06, 121.5654),
                at("o2", 25.08, 121.5654),
                at("in", 25.03, 121.56),
            ],
            CENTER,
            &viewport(),
            &config,
        );
        assert_eq!(ids(&out), ["in", "o1", "o2"]);
    }

    #[test]
    fn merged_list_is_capped_after_inside_group() {
        let config = RankConfig {
            total_cap: 20,
            ..RankConfig::default()
        };
        let mut candidates: Vec<_> = (0..25)
            .map(|i| at(&format!("in{i:02}"), 25.034 + f64::from(i) * 0.0005, 121.566))
            .collect();
        candidates.push(at("out", 25.06, 121.5654));

        let out = rank(candidates, CENTER, &viewport(), &config);
        assert_eq!(out.len(), 20);
        assert!(out.iter().all(|c| c.identity.starts_with("in")));
        assert_eq!(out[0].identity, "in00");
        assert_eq!(out[19].identity, "in19");
    }

    #[test]
    fn total_cap_counts_outside_candidates_too() {
        let config = RankConfig {
            total_cap: 2,
            ..RankConfig::default()
        };
        let out = rank(
            vec![
                at("o2", 25.08, 121.5654),
                at("in", 25.03, 121.56),
                at("o1", 25.06, 121.5654),
            ],
            CENTER,
            &viewport(),
            &config,
        );
        assert_eq!(ids(&out), ["in", "o1"]);
    }

    #[test]
    fn nan_location_is_dropped() {
        let out = rank(
            vec![at("nan", f64::NAN, 121.0)],
            CENTER,
            &viewport(),
            &RankConfig::default(),
        );
        assert!(out.is_empty());
    }
}
