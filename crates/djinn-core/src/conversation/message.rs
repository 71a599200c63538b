//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// The human user.
    User,
    /// The automated reply producer.
    Genie,
}

/// A single entry in the conversation log.
///
/// Messages are immutable once created: the timestamp is stamped at
/// construction and nothing mutates a message afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Creation time, RFC 3339.
    pub timestamp: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// A canned reply from the genie.
    pub fn genie(text: impl Into<String>) -> Self {
        Self::new(Sender::Genie, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender() {
        assert_eq!(Message::user("hi").sender, Sender::User);
        assert_eq!(Message::genie("ho").sender, Sender::Genie);
    }

    #[test]
    fn serialization_round_trip() {
        let original = Message::user("make a wish");
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }
}
