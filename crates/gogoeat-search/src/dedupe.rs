use std::collections::HashSet;

use gogoeat_core::RestaurantCandidate;

/// Drop candidates whose `identity` was already seen, keeping first-seen order.
///
/// The first record for an identity is kept whole; later duplicates are
/// discarded even when they carry more fields.
pub fn dedupe<I>(candidates: I) -> Vec<RestaurantCandidate>
where
    I: IntoIterator<Item = RestaurantCandidate>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.identity.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use gogoeat_core::{CandidateSource, Coordinate};

    use super::*;

    fn candidate(identity: &str, name: &str, rating: f64) -> RestaurantCandidate {
        RestaurantCandidate {
            identity: identity.to_string(),
            place_id: Some(identity.to_string()),
            name: name.to_string(),
            location: Coordinate::new(25.033, 121.5654),
            rating,
            price_level: 0,
            is_open_now: true,
            has_parking: None,
            address: String::new(),
            categories: Vec::new(),
            source: CandidateSource::TextVariant,
        }
    }

    #[test]
    fn first_seen_record_wins() {
        let out = dedupe(vec![
            candidate("p1", "noodles", 0.0),
            candidate("p2", "rice", 4.0),
            candidate("p1", "noodles (full)", 4.6),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].identity, "p1");
        assert_eq!(out[0].name, "noodles");
        assert_eq!(out[1].identity, "p2");
    }

    #[test]
    fn dedupe_is_idempotent_and_never_grows() {
        let input = vec![
            candidate("a", "a", 1.0),
            candidate("b", "b", 2.0),
            candidate("a", "a2", 3.0),
            candidate("c", "c", 4.0),
            candidate("b", "b2", 5.0),
        ];
        let once = dedupe(input.clone());
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
        assert!(once.len() <= input.len());
        let ids: Vec<&str> = once.iter().map(|c| c.identity.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
