//! Conversation store: persistence for the `conversation_messages` table.
//!
//! ## Modules
//!
//! - [`error`] – Store error types
//! - [`config`] – DbConfig (environment-driven connection settings)
//! - [`mysql_pool`] – PoolManager (lazy, closable MySQL pool)
//! - [`query`] – SqlValue parameters and QueryOutput
//! - [`models`] – ConversationMessage, NewConversationMessage, UserMessage, AssistantMessage
//! - [`repository`] – ConversationRepository trait
//! - [`message_store`] – MessageStore (MySQL)

mod config;
mod error;
mod message_store;
mod models;
mod mysql_pool;
mod query;
mod repository;


pub use config::DbConfig;
pub use error::{Result, StoreError};
pub use message_store::MessageStore;
pub use models::{
    AssistantMessage, ConversationMessage, InsertOutcome, MessageType, NewConversationMessage,
    UnknownMessageType, UserMessage, DEFAULT_CHAT_PREFERENCE, DEFAULT_USERNAME, ZULU_SENDER_AI,
};
pub use mysql_pool::PoolManager;
pub use query::{QueryOutput, SqlValue};
pub use repository::{ConversationRepository, DEFAULT_LATEST_LIMIT, DEFAULT_PAGE_LIMIT};
