//! Props Replay: host simulator for the props ledger.
//!
//! Plays the role the execution environment plays in production: it supplies
//! the caller and a non-decreasing height for every call, enforces the message
//! length boundary, and drains the event outbox after each call.
//!
//! ```text
//! script.jsonl ──parse──→ [ScriptStep] ──apply──→ PropsLedgerService
//!                                                     │
//!                         stdout ←── StepOutcome ←── outbox
//! ```

pub mod runner;
pub mod script;

pub use runner::{Replay, StepOutcome, StepResult, Summary};
pub use script::{parse_script, ScriptCall, ScriptError, ScriptStep};
