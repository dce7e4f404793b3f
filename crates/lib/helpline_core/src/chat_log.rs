//! Chat log persistence.
//!
//! Every handled request appends one document `{user, message, response}` to
//! the `chat_logs` collection. Records are never updated or deleted, and
//! identical documents are stored as separate rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use thiserror::Error;

use crate::uuid::uuidv7;

/// One request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLogRecord {
    /// Sender identifier (phone number as supplied by the caller).
    pub user: String,
    /// Trimmed user message.
    pub message: String,
    /// Final reply returned to the caller.
    pub response: String,
}

/// Errors that can occur while writing chat logs.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Failure reported by a store that is not backed by SQL.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only chat log store.
#[async_trait]
pub trait ChatLogStore: Send + Sync {
    async fn insert_one(&self, record: &ChatLogRecord) -> Result<(), StoreError>;

    /// Connectivity check used by health reporting.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Postgres-backed store: each record is a JSONB document in `chat_logs`.
#[derive(Clone, Debug)]
pub struct PgChatLogStore {
    pool: PgPool,
}

impl PgChatLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of records stored for a sender.
    pub async fn count_for_user(&self, user: &str) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM chat_logs WHERE document->>'user' = $1",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl ChatLogStore for PgChatLogStore {
    async fn insert_one(&self, record: &ChatLogRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO chat_logs (id, document) VALUES ($1, $2)")
            .bind(uuidv7())
            .bind(Json(record))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
