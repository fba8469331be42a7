// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Change notifications that invalidate derived state.

use tokio::sync::broadcast;
use uuid::Uuid;

/// Capacity of the event channel before slow receivers start lagging.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Something changed; derived state must be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    DestinationAdded(Uuid),
    DestinationUpdated(Uuid),
    DestinationDeleted(Uuid),
    /// The reference country preference changed (new ISO code)
    ReferenceCountryChanged(String),
}

/// Pub/sub bus for `CoreEvent`s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Returns the number of receivers notified.
    pub fn publish(&self, event: CoreEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "No subscribers for event");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.tx.subscribe()
    }
}
