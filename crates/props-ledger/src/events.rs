//! # Event Schema
//!
//! Notifications emitted once per committed mutation, for off-ledger
//! observers (indexers, UIs). The ledger never consumes its own events.
//!
//! Wire form of a `props-given` event:
//!
//! ```json
//! {
//!   "event": "props-given",
//!   "props-id": 0,
//!   "giver": "W1",
//!   "receiver": "W2",
//!   "amount": 1,
//!   "message": "hi",
//!   "block-height": 5,
//!   "receiver-total": 1
//! }
//! ```

use crate::domain::entities::PropsRecord;
use crate::domain::value_objects::{Amount, BlockHeight, Message, Principal, PropsId};
use serde::{Deserialize, Serialize};

// =============================================================================
// OUTBOUND EVENTS
// =============================================================================

/// Every event the ledger can emit, tagged by its `event` field.
///
/// Serialize-only. Readers parse [`PropsGivenEvent`] directly; an internally
/// tagged enum cannot deserialize `u128` fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum LedgerEvent {
    /// A props record was committed.
    PropsGiven(PropsGivenEvent),
}

impl LedgerEvent {
    /// Event tag as it appears on the wire.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::PropsGiven(_) => PROPS_GIVEN_TAG,
        }
    }

    /// Topic the event is published under.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::PropsGiven(_) => topics::PROPS_GIVEN,
        }
    }
}

/// Tag carried by [`LedgerEvent::PropsGiven`].
pub const PROPS_GIVEN_TAG: &str = "props-given";

/// Payload of a `props-given` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropsGivenEvent {
    /// Id of the new record.
    pub props_id: PropsId,
    /// Caller.
    pub giver: Principal,
    /// Receiver.
    pub receiver: Principal,
    /// Amount awarded by this record.
    pub amount: Amount,
    /// Attached message.
    pub message: Message,
    /// Height of the commit.
    pub block_height: BlockHeight,
    /// Receiver's `props-received` after this record.
    pub receiver_total: Amount,
}

impl PropsGivenEvent {
    /// Builds the event for a freshly committed record.
    #[must_use]
    pub fn from_record(record: &PropsRecord, receiver_total: Amount) -> Self {
        Self {
            props_id: record.id,
            giver: record.giver.clone(),
            receiver: record.receiver.clone(),
            amount: record.amount,
            message: record.message.clone(),
            block_height: record.timestamp,
            receiver_total,
        }
    }
}

// =============================================================================
// EVENT BUS TOPICS
// =============================================================================

/// Event topics for the props ledger.
pub mod topics {
    /// Topic for committed props records.
    pub const PROPS_GIVEN: &str = "props.given";
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LedgerEvent {
        LedgerEvent::PropsGiven(PropsGivenEvent {
            props_id: 0,
            giver: "W1".into(),
            receiver: "W2".into(),
            amount: 10,
            message: Message::new("Amazing contributions!").unwrap(),
            block_height: 3,
            receiver_total: 10,
        })
    }

    #[test]
    fn test_event_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "props-given",
                "props-id": 0,
                "giver": "W1",
                "receiver": "W2",
                "amount": 10,
                "message": "Amazing contributions!",
                "block-height": 3,
                "receiver-total": 10
            })
        );
    }

    #[test]
    fn test_payload_parses_from_wire() {
        let text = serde_json::to_string(&sample()).unwrap();
        let parsed: PropsGivenEvent = serde_json::from_str(&text).unwrap();
        let LedgerEvent::PropsGiven(expected) = sample();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_tag_and_topic() {
        assert_eq!(sample().tag(), PROPS_GIVEN_TAG);
        assert_eq!(sample().topic(), topics::PROPS_GIVEN);
    }
}
