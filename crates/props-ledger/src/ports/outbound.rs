//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on. The only outward signal besides return
//! values is the notification event.

use crate::events::LedgerEvent;

/// Receiver of committed ledger events.
///
/// `publish` is called synchronously right after the state commit, once per
/// successful mutation, in commit order. Implementations must not call back
/// into the ledger.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: &LedgerEvent);
}
