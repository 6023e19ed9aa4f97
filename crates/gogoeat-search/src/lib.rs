//! Restaurant search pipeline: normalize, dedupe, rank, tiered fallback
//! search, attribute filtering, and the explorer session that ties them to a
//! front-end.

pub mod dedupe;
pub mod error;
pub mod events;
pub mod filter;
pub mod normalize;
pub mod orchestrator;
pub mod provider;
pub mod random;
pub mod rank;
pub mod session;

pub use dedupe::dedupe;
pub use error::SearchError;
pub use events::{EventSender, ExplorerEvent};
pub use filter::{apply_filters, matches};
pub use normalize::{normalize_geocode, normalize_place};
pub use orchestrator::{SearchOrchestrator, SearchOutcome, SearchSettings, SearchTier};
pub use provider::{
    resolve_user_location, FixedLocation, LocationProvider, MapView, PlacesProvider, StaticMapView,
};
pub use random::{pick_random, pick_random_with};
pub use rank::{rank, RankConfig};
pub use session::{ExplorerSession, Selection};

#[cfg(test)]
pub(crate) mod test_support;
