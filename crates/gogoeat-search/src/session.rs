//! Explorer session: the current result set, the user's filters, and the
//! event channel rendered items use to report selections.

use gogoeat_core::{FilterCriteria, RestaurantCandidate};
use gogoeat_places::PlaceDetails;
use tokio::sync::mpsc;

use crate::error::SearchError;
use crate::events::{EventSender, ExplorerEvent};
use crate::filter::apply_filters;
use crate::provider::PlacesProvider;
use crate::random::pick_random;

/// A resolved selection: the candidate plus its details when it has a
/// place id.
#[derive(Debug, Clone)]
pub struct Selection {
    pub candidate: RestaurantCandidate,
    pub details: Option<PlaceDetails>,
}

pub struct ExplorerSession<P> {
    provider: P,
    candidates: Vec<RestaurantCandidate>,
    criteria: FilterCriteria,
    /// Weak so the channel closes once every handed-out sender is dropped.
    events_tx: Option<mpsc::WeakUnboundedSender<ExplorerEvent>>,
    events_rx: Option<mpsc::UnboundedReceiver<ExplorerEvent>>,
}

impl<P: PlacesProvider> ExplorerSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            candidates: Vec::new(),
            criteria: FilterCriteria::default(),
            events_tx: None,
            events_rx: None,
        }
    }

    /// Replaces the result set after a new search. Filters are kept.
    pub fn replace_candidates(&mut self, candidates: Vec<RestaurantCandidate>) {
        self.candidates = candidates;
    }

    pub fn candidates(&self) -> &[RestaurantCandidate] {
        &self.candidates
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    /// Candidates passing the current filters, in result order.
    pub fn visible(&self) -> Vec<RestaurantCandidate> {
        apply_filters(&self.candidates, &self.criteria)
    }

    /// Uniform pick over [`ExplorerSession::visible`].
    pub fn pick_random(&self) -> Option<RestaurantCandidate> {
        pick_random(&self.visible()).cloned()
    }

    /// Hands out a sender for rendered items.
    ///
    /// Reopens the channel if every earlier sender was dropped; events still
    /// queued on the closed channel move over in order.
    pub fn event_sender(&mut self) -> EventSender {
        if let Some(tx) = self
            .events_tx
            .as_ref()
            .and_then(mpsc::WeakUnboundedSender::upgrade)
        {
            return EventSender::new(tx);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(mut stale) = self.events_rx.take() {
            while let Ok(event) = stale.try_recv() {
                let _ = tx.send(event);
            }
        }
        self.events_tx = Some(tx.downgrade());
        self.events_rx = Some(rx);
        EventSender::new(tx)
    }

    /// Waits for the next event and resolves it into a [`Selection`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EventChannelClosed`] once no sender is alive and
    /// the queue is drained, [`SearchError::UnknownCandidate`] if the selected
    /// identity is not in the current result set, or [`SearchError::Details`]
    /// if the details lookup fails.
    pub async fn next_selection(&mut self) -> Result<Selection, SearchError> {
        let rx = self
            .events_rx
            .as_mut()
            .ok_or(SearchError::EventChannelClosed)?;
        let event = rx.recv().await.ok_or(SearchError::EventChannelClosed)?;
        self.handle(event).await
    }

    async fn handle(&self, event: ExplorerEvent) -> Result<Selection, SearchError> {
        match event {
            ExplorerEvent::CandidateSelected { identity } => {
                let candidate = self
                    .candidates
                    .iter()
                    .find(|c| c.identity == identity)
                    .cloned()
                    .ok_or(SearchError::UnknownCandidate { identity })?;
                let details = match candidate.place_id.as_deref() {
                    Some(place_id) => self.provider.place_details(place_id).await?,
                    None => None,
                };
                tracing::debug!(
                    identity = %candidate.identity,
                    has_details = details.is_some(),
                    "candidate selected"
                );
                Ok(Selection { candidate, details })
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
