use gogoeat_places::PlacesError;
use thiserror::Error;

/// Errors raised while resolving a selected candidate.
///
/// Search itself never fails: upstream errors degrade to empty tiers and the
/// caller sees a [`crate::SearchOutcome`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no candidate with identity '{identity}' in the current result set")]
    UnknownCandidate { identity: String },

    #[error("failed to fetch place details: {0}")]
    Details(#[from] PlacesError),

    #[error("explorer event channel closed")]
    EventChannelClosed,
}
