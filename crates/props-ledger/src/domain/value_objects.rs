//! # Value Objects
//!
//! Immutable domain primitives for the props ledger.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::MessageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential identifier of a props record (starts at 0).
pub type PropsId = u64;

/// Logical height supplied by the host at call time.
pub type BlockHeight = u64;

/// Quantity of recognition.
pub type Amount = u128;

/// Maximum message length in Unicode scalar values.
pub const MAX_MESSAGE_CHARS: usize = 500;

// =============================================================================
// PRINCIPAL
// =============================================================================

/// An account identifier.
///
/// The host authenticates principals; the ledger only compares them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A props message holding between 1 and [`MAX_MESSAGE_CHARS`] code points.
///
/// `Message::new` is the caller-facing boundary. Everything past it assumes
/// the length invariant and never checks again.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Message(String);

impl Message {
    /// Validates and wraps message text.
    ///
    /// # Errors
    ///
    /// * [`MessageError::Empty`] - no characters
    /// * [`MessageError::TooLong`] - more than [`MAX_MESSAGE_CHARS`] code points
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        let chars = text.chars().count();
        if chars == 0 {
            return Err(MessageError::Empty);
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(MessageError::TooLong {
                chars,
                max: MAX_MESSAGE_CHARS,
            });
        }
        Ok(Self(text))
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in code points.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:?})", self.0)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Message {
    type Error = MessageError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl TryFrom<&str> for Message {
    type Error = MessageError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Message> for String {
    fn from(message: Message) -> Self {
        message.0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_at_max_length() {
        let text = "a".repeat(MAX_MESSAGE_CHARS);
        let message = Message::new(text.clone()).unwrap();
        assert_eq!(message.as_str(), text);
        assert_eq!(message.char_count(), 500);
    }

    #[test]
    fn test_message_too_long() {
        let err = Message::new("a".repeat(MAX_MESSAGE_CHARS + 1)).unwrap_err();
        assert_eq!(err, MessageError::TooLong { chars: 501, max: 500 });
    }

    #[test]
    fn test_message_empty() {
        assert_eq!(Message::new("").unwrap_err(), MessageError::Empty);
    }

    #[test]
    fn test_message_counts_code_points_not_bytes() {
        // 4-byte emoji: 500 of them is 2000 bytes but still valid
        let text = "🚀".repeat(MAX_MESSAGE_CHARS);
        assert!(text.len() > MAX_MESSAGE_CHARS);
        assert!(Message::new(text).is_ok());

        let message = Message::new("Amazing work! 🚀🎉 Keep it up! 💪").unwrap();
        assert_eq!(message.char_count(), 30);
    }

    #[test]
    fn test_message_deserialize_validates() {
        let ok: Message = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(ok.as_str(), "hi");
        assert!(serde_json::from_str::<Message>("\"\"").is_err());
    }

    #[test]
    fn test_principal_serializes_as_string() {
        let p = Principal::new("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5\"");
        assert_eq!(p.to_string(), p.as_str());
    }
}
