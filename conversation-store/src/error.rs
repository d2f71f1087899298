//! Store error types.
//!
//! Every failed statement surfaces as [`StoreError::Database`]; configuration problems are
//! reported separately and only while building a [`DbConfig`](crate::DbConfig).

use thiserror::Error;

/// Errors returned by the conversation store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
