//! Persisted rows and insert records for `conversation_messages`.

mod conversation_message;
mod new_message;

pub use conversation_message::{ConversationMessage, MessageType, UnknownMessageType};
pub use new_message::{
    AssistantMessage, InsertOutcome, NewConversationMessage, UserMessage,
    DEFAULT_CHAT_PREFERENCE, DEFAULT_USERNAME, ZULU_SENDER_AI,
};
