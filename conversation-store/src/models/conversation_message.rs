//! Conversation message row model.
//!
//! Maps to the `conversation_messages` table; returned by the message readers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who authored a message: the human participant or the Zulu assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    User,
    Zulu,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::User => "user",
            MessageType::Zulu => "zulu",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown message_type: {0}")]
pub struct UnknownMessageType(pub String);

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageType::User),
            "zulu" => Ok(MessageType::Zulu),
            other => Err(UnknownMessageType(other.to_string())),
        }
    }
}

impl TryFrom<String> for MessageType {
    type Error = UnknownMessageType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationMessage {
    pub id: i64,
    pub conversation_id: i64,
    pub user_id: i64,
    pub username: String,
    pub message: String,
    pub media: Option<String>,
    #[sqlx(try_from = "String")]
    pub message_type: MessageType,
    pub chat_preference: String,
    pub component_type: Option<String>,
    pub component_id: Option<String>,
    pub zulu_sender_type: Option<String>,
    pub zulu_agent_id: Option<String>,
    pub zulu_agent_name: Option<String>,
    pub is_read: bool,
    /// Serialized recommendation payload, kept as text.
    pub recommendation_json: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    /// Parses `recommendation_json`, if present.
    pub fn recommendation(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        self.recommendation_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_round_trips_through_text() {
        assert_eq!("user".parse::<MessageType>(), Ok(MessageType::User));
        assert_eq!("zulu".parse::<MessageType>(), Ok(MessageType::Zulu));
        assert_eq!(MessageType::Zulu.to_string(), "zulu");
        assert_eq!(
            "bot".parse::<MessageType>(),
            Err(UnknownMessageType("bot".to_string()))
        );
    }

    #[test]
    fn test_message_type_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&MessageType::Zulu).unwrap(), "\"zulu\"");
        let parsed: MessageType = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, MessageType::User);
    }
}
