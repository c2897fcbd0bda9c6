//! # Event Sinks
//!
//! `EventSink` implementations: an in-memory outbox drained by the host, a
//! sink that logs through `tracing`, and a sink that drops everything.

use crate::events::LedgerEvent;
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use tracing::info;

/// Append-only buffer of events, drained by the host after each call.
///
/// Order matches commit order.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    events: Mutex<Vec<LedgerEvent>>,
}

impl InMemoryOutbox {
    /// Create an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every buffered event.
    pub fn drain(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for InMemoryOutbox {
    fn publish(&self, event: &LedgerEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Logs each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::PropsGiven(e) => info!(
                topic = event.topic(),
                props_id = e.props_id,
                giver = %e.giver,
                receiver = %e.receiver,
                amount = %e.amount,
                block_height = e.block_height,
                receiver_total = %e.receiver_total,
                "props-given"
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: &LedgerEvent) {}
}
