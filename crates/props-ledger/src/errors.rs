//! # Error Types
//!
//! All error types for the props ledger.
//!
//! | Code | Constant | Raised by |
//! |------|----------|-----------|
//! | 101 | `ERR_SELF_PROPS` | mutation precondition 1 |
//! | 102 | `ERR_INVALID_AMOUNT` | mutation precondition 2 |
//! | 103 | `ERR_MESSAGE_TOO_LONG` | `Message::new` (boundary) |
//! | 104 | `ERR_EMPTY_MESSAGE` | `Message::new` (boundary) |
//! | 198 | `ERR_STALE_TRANSITION` | transition commit |
//! | 199 | `ERR_ARITHMETIC_OVERFLOW` | transition preparation or commit |

use crate::domain::value_objects::PropsId;
use thiserror::Error;

/// Caller named itself as receiver.
pub const ERR_SELF_PROPS: u32 = 101;
/// Requested amount is zero.
pub const ERR_INVALID_AMOUNT: u32 = 102;
/// Message exceeds the maximum length.
pub const ERR_MESSAGE_TOO_LONG: u32 = 103;
/// Message has no characters.
pub const ERR_EMPTY_MESSAGE: u32 = 104;
/// A prepared transition no longer matches the ledger it is committed to.
pub const ERR_STALE_TRANSITION: u32 = 198;
/// A running total would exceed `u128::MAX`.
pub const ERR_ARITHMETIC_OVERFLOW: u32 = 199;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by mutation operations.
///
/// Every variant is raised before the first state write, so a failed call
/// leaves the ledger exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PropsError {
    /// Caller tried to give props to itself.
    #[error("cannot give props to yourself")]
    SelfProps,

    /// Amount was zero.
    #[error("props amount must be at least 1")]
    InvalidAmount,

    /// Transition was prepared before another record was committed.
    #[error("stale transition: ledger expects id {expected}, transition has id {found}")]
    StaleTransition {
        /// Id the ledger will assign next.
        expected: PropsId,
        /// Id carried by the transition.
        found: PropsId,
    },

    /// Applying the award would overflow a running total.
    #[error("props total overflow")]
    ArithmeticOverflow,
}

impl PropsError {
    /// Numeric error code reported to the host.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::SelfProps => ERR_SELF_PROPS,
            Self::InvalidAmount => ERR_INVALID_AMOUNT,
            Self::StaleTransition { .. } => ERR_STALE_TRANSITION,
            Self::ArithmeticOverflow => ERR_ARITHMETIC_OVERFLOW,
        }
    }

    /// Returns true if the caller can fix its input and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SelfProps | Self::InvalidAmount)
    }
}

// =============================================================================
// BOUNDARY ERRORS
// =============================================================================

/// Errors raised when raw text is turned into a [`Message`](crate::domain::Message).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    /// Message has no characters.
    #[error("message is empty")]
    Empty,

    /// Message exceeds the code point limit.
    #[error("message too long: {chars} > {max} characters")]
    TooLong {
        /// Code points in the rejected text.
        chars: usize,
        /// Allowed maximum.
        max: usize,
    },
}

impl MessageError {
    /// Numeric error code reported to the host.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::Empty => ERR_EMPTY_MESSAGE,
            Self::TooLong { .. } => ERR_MESSAGE_TOO_LONG,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
