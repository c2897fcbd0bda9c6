//! # Props Ledger - Peer Recognition Subsystem
//!
//! Accounts award discrete units of recognition ("props") to other accounts.
//! Each award is an immutable record carrying a message and the logical
//! height it was created at; the ledger keeps per-account aggregates and
//! history alongside.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Sequential, gap-free ids | `domain/state.rs` - `LedgerState::commit()` |
//! | Conserved totals | `domain/invariants.rs` - `check_conservation_invariant()` |
//! | Write-once first props block | `domain/state.rs` - `LedgerState::commit()` |
//! | Ordered per-account history | `domain/invariants.rs` - `check_account_invariants()` |
//! | No state change on rejection | `domain/state.rs` - `LedgerState::prepare()`, `LedgerState::commit()` |
//!
//! ## Host Contract
//!
//! The host supplies an authenticated caller and a non-decreasing height with
//! every mutation (`CallContext`) and builds messages through `Message::new`,
//! which enforces the 500 code point limit. Neither is re-checked here.
//!
//! ## Usage Example
//!
//! ```
//! use props_ledger::prelude::*;
//! use std::sync::Arc;
//!
//! let outbox = Arc::new(InMemoryOutbox::new());
//! let mut ledger = PropsLedgerService::new(Arc::clone(&outbox), LedgerConfig::default());
//!
//! let ctx = CallContext::new("W1", 100);
//! let id = ledger
//!     .give_props(&ctx, &Principal::new("W2"), Message::new("hi").unwrap())
//!     .unwrap();
//!
//! assert_eq!(id, 0);
//! assert_eq!(ledger.get_props_received(&Principal::new("W2")), 1);
//! assert_eq!(outbox.drain().len(), 1);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        AccountAggregate, CallContext, PropsDetails, PropsRecord, UserStats,
    };
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::state::{LedgerState, PropsTransition};
    pub use crate::domain::value_objects::{
        Amount, BlockHeight, Message, Principal, PropsId, MAX_MESSAGE_CHARS,
    };

    pub use crate::ports::inbound::{PropsLedgerApi, PropsQueryApi};
    pub use crate::ports::outbound::EventSink;

    pub use crate::events::{topics, LedgerEvent, PropsGivenEvent, PROPS_GIVEN_TAG};

    pub use crate::errors::{MessageError, PropsError};

    pub use crate::adapters::{
        InMemoryOutbox, NullEventSink, SharedPropsLedger, TracingEventSink,
    };

    pub use crate::service::{LedgerConfig, PropsLedgerService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Props Ledger";
