use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AssistantMessage, ConversationMessage, InsertOutcome, NewConversationMessage, UserMessage,
};

/// Page size of [`ConversationRepository::get_conversation_messages`] when no limit is given.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Row cap of [`ConversationRepository::get_latest_messages`] when no limit is given.
pub const DEFAULT_LATEST_LIMIT: i64 = 10;

/// Writers and readers over `conversation_messages`.
///
/// The convenience writers only shape the record; every insert goes through
/// [`insert_conversation_message`](Self::insert_conversation_message).
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn insert_conversation_message(
        &self,
        message: &NewConversationMessage,
    ) -> Result<InsertOutcome>;

    /// Inserts a message authored by the human participant (`message_type = user`, no sender type).
    async fn insert_user_message(&self, message: UserMessage) -> Result<InsertOutcome> {
        let record = NewConversationMessage::from(message);
        self.insert_conversation_message(&record).await
    }

    /// Inserts a Zulu reply (`message_type = zulu`, `zulu_sender_type = ai`, no media).
    async fn insert_assistant_message(&self, message: AssistantMessage) -> Result<InsertOutcome> {
        let record = NewConversationMessage::from(message);
        self.insert_conversation_message(&record).await
    }

    /// Oldest first; `limit` defaults to 50 and `offset` to 0.
    async fn get_conversation_messages(
        &self,
        conversation_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ConversationMessage>>;

    /// Newest first, at most `limit` rows (default 10).
    async fn get_latest_messages(
        &self,
        conversation_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ConversationMessage>>;
}
