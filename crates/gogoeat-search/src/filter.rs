use gogoeat_core::{FilterCriteria, RestaurantCandidate};

/// Returns `true` if `candidate` passes every active constraint in `criteria`.
#[must_use]
pub fn matches(candidate: &RestaurantCandidate, criteria: &FilterCriteria) -> bool {
    if let Some(text) = criteria
        .search_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let needle = text.to_lowercase();
        let hit = candidate.name.to_lowercase().contains(&needle)
            || candidate
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    if let Some(min) = criteria.min_rating {
        if candidate.rating < min {
            return false;
        }
    }

    if criteria.open_now_only && !candidate.is_open_now {
        return false;
    }

    if criteria.has_parking_only && candidate.has_parking != Some(true) {
        return false;
    }

    criteria
        .budget_bracket
        .is_none_or(|bracket| bracket.accepts(candidate.price_level))
}

/// Order-preserving filter over `candidates`.
#[must_use]
pub fn apply_filters(
    candidates: &[RestaurantCandidate],
    criteria: &FilterCriteria,
) -> Vec<RestaurantCandidate> {
    candidates
        .iter()
        .filter(|c| matches(c, criteria))
        .cloned()
        .collect()
}
