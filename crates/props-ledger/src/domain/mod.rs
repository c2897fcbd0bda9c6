//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic: value objects, entities, the state store and its
//! invariants. No I/O, no logging.

pub mod entities;
pub mod invariants;
pub mod state;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use state::*;
pub use value_objects::*;
