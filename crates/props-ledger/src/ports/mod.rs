//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the props ledger.
//!
//! - **Driving Ports (Inbound)**: `PropsLedgerApi`, `PropsQueryApi`
//! - **Driven Ports (Outbound)**: `EventSink`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
