//! Typed events posted by rendered items back to the explorer session.

use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEvent {
    /// A marker or list item for this candidate was activated.
    CandidateSelected { identity: String },
}

/// Cloneable handle handed to each rendered item.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ExplorerEvent>,
}

impl EventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ExplorerEvent>) -> Self {
        Self { tx }
    }

    /// Posts `event`; returns `false` if the owning session is gone.
    pub fn send(&self, event: ExplorerEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Posts [`ExplorerEvent::CandidateSelected`] for `identity`.
    pub fn select(&self, identity: impl Into<String>) -> bool {
        self.send(ExplorerEvent::CandidateSelected {
            identity: identity.into(),
        })
    }
}
