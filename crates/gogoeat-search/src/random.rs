use gogoeat_core::RestaurantCandidate;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Uniformly random candidate, or `None` when `candidates` is empty.
#[must_use]
pub fn pick_random(candidates: &[RestaurantCandidate]) -> Option<&RestaurantCandidate> {
    pick_random_with(candidates, &mut rand::rng())
}

/// [`pick_random`] with a caller-supplied RNG.
pub fn pick_random_with<'a, R: Rng + ?Sized>(
    candidates: &'a [RestaurantCandidate],
    rng: &mut R,
) -> Option<&'a RestaurantCandidate> {
    candidates.choose(rng)
}
