//! # Core Domain Entities
//!
//! Records, per-account aggregates and the call context supplied by the host.

use crate::domain::value_objects::{Amount, BlockHeight, Message, Principal, PropsId};
use serde::{Deserialize, Serialize};

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Inputs the host supplies with every mutation.
///
/// Both values are trusted: the caller is already authenticated and the
/// height never decreases between calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Authenticated caller.
    pub caller: Principal,
    /// Current logical height.
    pub block_height: BlockHeight,
}

impl CallContext {
    /// Creates a call context.
    #[must_use]
    pub fn new(caller: impl Into<Principal>, block_height: BlockHeight) -> Self {
        Self {
            caller: caller.into(),
            block_height,
        }
    }
}

// =============================================================================
// PROPS RECORD
// =============================================================================

/// One award. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropsRecord {
    /// Sequential identifier.
    pub id: PropsId,
    /// Account that gave the props.
    pub giver: Principal,
    /// Account that received the props. Never equal to `giver`.
    pub receiver: Principal,
    /// Attached message.
    pub message: Message,
    /// Quantity conveyed, at least 1.
    pub amount: Amount,
    /// Height at which the record was created.
    pub timestamp: BlockHeight,
}

impl PropsRecord {
    /// Snapshot returned by `get-props-by-id`.
    #[must_use]
    pub fn details(&self) -> PropsDetails {
        PropsDetails {
            giver: self.giver.clone(),
            receiver: self.receiver.clone(),
            message: self.message.clone(),
            timestamp: self.timestamp,
            amount: self.amount,
        }
    }
}

/// Record snapshot without its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropsDetails {
    /// Giver.
    pub giver: Principal,
    /// Receiver.
    pub receiver: Principal,
    /// Message.
    pub message: Message,
    /// Creation height.
    pub timestamp: BlockHeight,
    /// Amount.
    pub amount: Amount,
}

// =============================================================================
// ACCOUNT AGGREGATE
// =============================================================================

/// Running totals for one account.
///
/// Created lazily on first touch and never removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountAggregate {
    /// Sum of amounts received.
    pub props_received: Amount,
    /// Sum of amounts given.
    pub props_given: Amount,
    /// Height of the first record received. Write-once.
    pub first_props_block: Option<BlockHeight>,
    /// Ids received, in creation order.
    pub history: Vec<PropsId>,
}

impl AccountAggregate {
    /// Stats view of this aggregate.
    #[must_use]
    pub fn stats(&self) -> UserStats {
        UserStats {
            props_received: self.props_received,
            props_given: self.props_given,
            first_props_block: self.first_props_block,
        }
    }
}

/// Result of `get-user-stats`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserStats {
    /// Total received.
    pub props_received: Amount,
    /// Total given.
    pub props_given: Amount,
    /// First height at which props were received.
    pub first_props_block: Option<BlockHeight>,
}
