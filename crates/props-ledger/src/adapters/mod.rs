//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters connect the ledger to its host.
//!
//! - Event sinks implement the outbound `EventSink` port
//! - `SharedPropsLedger` lets multi-threaded hosts share one ledger

pub mod event_sinks;
pub mod shared_ledger;

pub use event_sinks::*;
pub use shared_ledger::*;
