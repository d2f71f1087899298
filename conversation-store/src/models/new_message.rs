//! Insert records for `conversation_messages`.
//!
//! [`NewConversationMessage`] carries the three required fields as constructor arguments and a
//! documented default for every other column. [`UserMessage`] and [`AssistantMessage`] are the
//! narrower inputs of the two convenience writers.

use serde::{Deserialize, Serialize};

use super::conversation_message::MessageType;
use crate::query::SqlValue;

pub const DEFAULT_USERNAME: &str = "";
pub const DEFAULT_CHAT_PREFERENCE: &str = "ai";
/// `zulu_sender_type` written for assistant replies.
pub const ZULU_SENDER_AI: &str = "ai";

fn default_chat_preference() -> String {
    DEFAULT_CHAT_PREFERENCE.to_string()
}

/// One row to insert. Deserializing fills absent optional fields with the same defaults as
/// [`NewConversationMessage::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConversationMessage {
    pub conversation_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    pub message: String,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default = "default_chat_preference")]
    pub chat_preference: String,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub zulu_sender_type: Option<String>,
    #[serde(default)]
    pub zulu_agent_id: Option<String>,
    #[serde(default)]
    pub zulu_agent_name: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub recommendation_json: Option<String>,
}

impl NewConversationMessage {
    /// A user-authored, unread message with every optional column at its default.
    pub fn new(conversation_id: i64, user_id: i64, message: impl Into<String>) -> Self {
        Self {
            conversation_id,
            user_id,
            username: DEFAULT_USERNAME.to_string(),
            message: message.into(),
            media: None,
            message_type: MessageType::User,
            chat_preference: default_chat_preference(),
            component_type: None,
            component_id: None,
            zulu_sender_type: None,
            zulu_agent_id: None,
            zulu_agent_name: None,
            is_read: false,
            recommendation_json: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_media(mut self, media: Option<String>) -> Self {
        self.media = media;
        self
    }

    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn with_chat_preference(mut self, chat_preference: impl Into<String>) -> Self {
        self.chat_preference = chat_preference.into();
        self
    }

    /// Links the message to an embedded UI component.
    pub fn with_component(
        mut self,
        component_type: impl Into<String>,
        component_id: impl Into<String>,
    ) -> Self {
        self.component_type = Some(component_type.into());
        self.component_id = Some(component_id.into());
        self
    }

    pub fn with_zulu_sender_type(mut self, sender_type: Option<String>) -> Self {
        self.zulu_sender_type = sender_type;
        self
    }

    /// Records which assistant agent produced the message.
    pub fn with_zulu_agent(
        mut self,
        agent_id: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Self {
        self.zulu_agent_id = Some(agent_id.into());
        self.zulu_agent_name = Some(agent_name.into());
        self
    }

    pub fn with_is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn with_recommendation_json(mut self, recommendation_json: Option<String>) -> Self {
        self.recommendation_json = recommendation_json;
        self
    }

    /// Serializes `recommendation` into `recommendation_json`.
    pub fn with_recommendation(
        self,
        recommendation: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(recommendation)?;
        Ok(self.with_recommendation_json(Some(json)))
    }

    /// Bind values in insert column order.
    pub(crate) fn params(&self) -> Vec<SqlValue> {
        vec![
            self.conversation_id.into(),
            self.user_id.into(),
            self.username.as_str().into(),
            self.message.as_str().into(),
            self.media.clone().into(),
            self.message_type.as_str().into(),
            self.chat_preference.as_str().into(),
            self.component_type.clone().into(),
            self.component_id.clone().into(),
            self.zulu_sender_type.clone().into(),
            self.zulu_agent_id.clone().into(),
            self.zulu_agent_name.clone().into(),
            self.is_read.into(),
            self.recommendation_json.clone().into(),
        ]
    }
}

/// Input of `insert_user_message`. Unset `username` and `chat_preference` take the writer
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub conversation_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub message: String,
    pub media: Option<String>,
    pub chat_preference: Option<String>,
}

impl From<UserMessage> for NewConversationMessage {
    fn from(input: UserMessage) -> Self {
        let mut record = NewConversationMessage::new(
            input.conversation_id,
            input.user_id,
            input.message,
        )
        .with_media(input.media)
        .with_message_type(MessageType::User)
        .with_zulu_sender_type(None);
        if let Some(username) = input.username {
            record.username = username;
        }
        if let Some(chat_preference) = input.chat_preference {
            record.chat_preference = chat_preference;
        }
        record
    }
}

/// Input of `insert_assistant_message`. Assistant replies never carry media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub conversation_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub message: String,
    pub chat_preference: Option<String>,
    pub recommendation_json: Option<String>,
}

impl From<AssistantMessage> for NewConversationMessage {
    fn from(input: AssistantMessage) -> Self {
        let mut record = NewConversationMessage::new(
            input.conversation_id,
            input.user_id,
            input.message,
        )
        .with_media(None)
        .with_message_type(MessageType::Zulu)
        .with_zulu_sender_type(Some(ZULU_SENDER_AI.to_string()))
        .with_recommendation_json(input.recommendation_json);
        if let Some(username) = input.username {
            record.username = username;
        }
        if let Some(chat_preference) = input.chat_preference {
            record.chat_preference = chat_preference;
        }
        record
    }
}

/// Result of an insert: the generated row id and affected row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOutcome {
    pub id: u64,
    pub rows_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_fills_defaults() {
        let record = NewConversationMessage::new(1, 42, "hi");
        assert_eq!(record.username, "");
        assert_eq!(record.media, None);
        assert_eq!(record.message_type, MessageType::User);
        assert_eq!(record.chat_preference, "ai");
        assert_eq!(record.component_type, None);
        assert_eq!(record.component_id, None);
        assert_eq!(record.zulu_sender_type, None);
        assert_eq!(record.zulu_agent_id, None);
        assert_eq!(record.zulu_agent_name, None);
        assert!(!record.is_read);
        assert_eq!(record.recommendation_json, None);
    }

    #[test]
    fn test_deserialize_applies_same_defaults_as_new() {
        let record: NewConversationMessage =
            serde_json::from_value(json!({ "conversation_id": 1, "user_id": 42, "message": "hi" }))
                .unwrap();
        assert_eq!(record, NewConversationMessage::new(1, 42, "hi"));
    }

    #[test]
    fn test_params_follow_insert_column_order() {
        let record = NewConversationMessage::new(7, 42, "hello")
            .with_username("alice")
            .with_component("card", "c-1")
            .with_zulu_agent("agent-9", "Planner")
            .with_is_read(true);

        assert_eq!(
            record.params(),
            vec![
                SqlValue::Int(7),
                SqlValue::Int(42),
                SqlValue::Text("alice".to_string()),
                SqlValue::Text("hello".to_string()),
                SqlValue::Null,
                SqlValue::Text("user".to_string()),
                SqlValue::Text("ai".to_string()),
                SqlValue::Text("card".to_string()),
                SqlValue::Text("c-1".to_string()),
                SqlValue::Null,
                SqlValue::Text("agent-9".to_string()),
                SqlValue::Text("Planner".to_string()),
                SqlValue::Bool(true),
                SqlValue::Null,
            ]
        );
    }

    #[test]
    fn test_with_recommendation_serializes_payload() {
        let record = NewConversationMessage::new(1, 2, "try this")
            .with_recommendation(&json!({ "items": [1, 2] }))
            .unwrap();
        let stored: serde_json::Value =
            serde_json::from_str(record.recommendation_json.as_deref().unwrap()).unwrap();
        assert_eq!(stored, json!({ "items": [1, 2] }));
    }

    #[test]
    fn test_user_message_shaping() {
        let record: NewConversationMessage = UserMessage {
            conversation_id: 1,
            user_id: 42,
            username: Some("alice".to_string()),
            message: "hi".to_string(),
            media: Some("uploads/cat.png".to_string()),
            chat_preference: None,
        }
        .into();

        assert_eq!(record.message_type, MessageType::User);
        assert_eq!(record.zulu_sender_type, None);
        assert_eq!(record.username, "alice");
        assert_eq!(record.media.as_deref(), Some("uploads/cat.png"));
        assert_eq!(record.chat_preference, "ai");
    }

    #[test]
    fn test_assistant_message_shaping() {
        let record: NewConversationMessage = AssistantMessage {
            conversation_id: 1,
            user_id: 42,
            username: None,
            message: "hello from zulu".to_string(),
            chat_preference: Some("human".to_string()),
            recommendation_json: Some("{\"id\":3}".to_string()),
        }
        .into();

        assert_eq!(record.message_type, MessageType::Zulu);
        assert_eq!(record.zulu_sender_type.as_deref(), Some("ai"));
        assert_eq!(record.media, None);
        assert_eq!(record.username, "");
        assert_eq!(record.chat_preference, "human");
        assert_eq!(record.recommendation_json.as_deref(), Some("{\"id\":3}"));
    }
}
