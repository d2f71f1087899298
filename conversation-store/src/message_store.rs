//! Message store: MySQL-backed implementation of [`ConversationRepository`].
//!
//! Uses PoolManager for connections and the models (NewConversationMessage, ConversationMessage).
//! Every statement runs through `execute_query`, which holds one pooled connection for exactly
//! the duration of the statement.

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::mysql::{MySqlConnection, MySqlPool};
use sqlx::Either;
use tracing::{debug, error, info};

use crate::config::DbConfig;
use crate::error::{Result, StoreError};
use crate::models::{ConversationMessage, InsertOutcome, NewConversationMessage};
use crate::mysql_pool::PoolManager;
use crate::query::{QueryOutput, SqlValue};
use crate::repository::{ConversationRepository, DEFAULT_LATEST_LIMIT, DEFAULT_PAGE_LIMIT};

const INSERT_MESSAGE_SQL: &str = r#"
    INSERT INTO conversation_messages
    (conversation_id, user_id, username, message, media, message_type, chat_preference,
     component_type, component_id, zulu_sender_type, zulu_agent_id, zulu_agent_name, is_read, recommendation_json)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const SELECT_CONVERSATION_SQL: &str = r#"
    SELECT * FROM conversation_messages
    WHERE conversation_id = ?
    ORDER BY created_at ASC, id ASC
    LIMIT ? OFFSET ?
"#;

const SELECT_LATEST_SQL: &str = r#"
    SELECT * FROM conversation_messages
    WHERE conversation_id = ?
    ORDER BY created_at DESC, id DESC
    LIMIT ?
"#;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS conversation_messages (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        conversation_id BIGINT NOT NULL,
        user_id BIGINT NOT NULL,
        username VARCHAR(255) NOT NULL DEFAULT '',
        message TEXT NOT NULL,
        media TEXT NULL,
        message_type VARCHAR(16) NOT NULL DEFAULT 'user',
        chat_preference VARCHAR(32) NOT NULL DEFAULT 'ai',
        component_type VARCHAR(64) NULL,
        component_id VARCHAR(64) NULL,
        zulu_sender_type VARCHAR(32) NULL,
        zulu_agent_id VARCHAR(64) NULL,
        zulu_agent_name VARCHAR(255) NULL,
        is_read TINYINT(1) NOT NULL DEFAULT 0,
        recommendation_json TEXT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        INDEX idx_conversation_messages_conversation (conversation_id, created_at)
    )
"#;

#[derive(Clone)]
pub struct MessageStore {
    pool_manager: PoolManager,
}

impl MessageStore {
    pub fn new(pool_manager: PoolManager) -> Self {
        Self { pool_manager }
    }

    /// Builds a store from `DB_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(PoolManager::new(DbConfig::from_env()?)))
    }

    pub fn pool_manager(&self) -> &PoolManager {
        &self.pool_manager
    }

    pub async fn get_pool(&self) -> MySqlPool {
        self.pool_manager.get_pool().await
    }

    /// Call on shutdown.
    pub async fn close_pool(&self) {
        self.pool_manager.close_pool().await;
    }

    /// Creates `conversation_messages` when it does not exist. Existing tables are left as is.
    pub async fn ensure_schema(&self) -> Result<()> {
        info!("Creating conversation_messages table if not exist");
        self.execute_query(CREATE_TABLE_SQL, &[]).await?;
        Ok(())
    }

    /// Runs one parameterized statement on a pooled connection.
    ///
    /// The connection goes back to the pool whether the statement succeeds or fails. Failures
    /// are logged and returned as [`StoreError::Database`] with the driver error untouched.
    pub async fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryOutput> {
        let pool = self.pool_manager.get_pool().await;
        let mut conn = pool.acquire().await.map_err(|e| {
            error!(error = %e, "Conversation DB connection acquire error");
            StoreError::from(e)
        })?;

        let result = run_statement(&mut conn, sql, params).await;
        drop(conn);

        match result {
            Ok(output) => {
                debug!(
                    rows = output.rows.len(),
                    rows_affected = output.rows_affected,
                    "Conversation DB query done"
                );
                Ok(output)
            }
            Err(e) => {
                error!(error = %e, sql = sql.trim(), "Conversation DB query error");
                Err(StoreError::from(e))
            }
        }
    }
}

async fn run_statement(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[SqlValue],
) -> std::result::Result<QueryOutput, sqlx::Error> {
    let query = params
        .iter()
        .fold(sqlx::query(sql), |query, param| param.bind_to(query));

    let mut output = QueryOutput::default();
    let mut results = query.fetch_many(conn);
    while let Some(step) = results.try_next().await? {
        match step {
            Either::Left(done) => {
                output.rows_affected += done.rows_affected();
                if done.last_insert_id() != 0 {
                    output.last_insert_id = done.last_insert_id();
                }
            }
            Either::Right(row) => output.rows.push(row),
        }
    }
    Ok(output)
}

#[async_trait]
impl ConversationRepository for MessageStore {
    async fn insert_conversation_message(
        &self,
        message: &NewConversationMessage,
    ) -> Result<InsertOutcome> {
        let output = self
            .execute_query(INSERT_MESSAGE_SQL, &message.params())
            .await?;

        info!(
            id = output.last_insert_id,
            conversation_id = message.conversation_id,
            message_type = %message.message_type,
            "Saved conversation message"
        );

        Ok(InsertOutcome {
            id: output.last_insert_id,
            rows_affected: output.rows_affected,
        })
    }

    async fn get_conversation_messages(
        &self,
        conversation_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ConversationMessage>> {
        let params = [
            SqlValue::from(conversation_id),
            SqlValue::from(limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
            SqlValue::from(offset.unwrap_or(0)),
        ];
        let messages: Vec<ConversationMessage> = self
            .execute_query(SELECT_CONVERSATION_SQL, &params)
            .await?
            .decode()?;

        debug!(
            conversation_id,
            count = messages.len(),
            "Retrieved conversation messages"
        );
        Ok(messages)
    }

    async fn get_latest_messages(
        &self,
        conversation_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ConversationMessage>> {
        let params = [
            SqlValue::from(conversation_id),
            SqlValue::from(limit.unwrap_or(DEFAULT_LATEST_LIMIT)),
        ];
        let messages: Vec<ConversationMessage> = self
            .execute_query(SELECT_LATEST_SQL, &params)
            .await?
            .decode()?;

        debug!(
            conversation_id,
            count = messages.len(),
            "Retrieved latest conversation messages"
        );
        Ok(messages)
    }
}
