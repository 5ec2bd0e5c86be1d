// repositories/document_repository.rs

use async_trait::async_trait;
use deadpool_postgres::{Client, Pool};
use thiserror::Error;
use tokio_postgres::Row;

use crate::models::{chat::Chat, user::UserProfile};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to get client from pool: {0}")]
    Pool(String),
    #[error("Query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
    #[error("Malformed {column} in document {id}: {message}")]
    Decode {
        id: String,
        column: &'static str,
        message: String,
    },
}

/// Point lookups against the chat and user collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a chat by id, `None` when no such document exists
    async fn find_chat(&self, chat_id: &str) -> Result<Option<Chat>, StoreError>;

    /// Fetches a user profile by id, `None` when no such document exists
    async fn find_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
}

pub struct PgDocumentStore {
    pool: Pool,
}

impl PgDocumentStore {
    pub fn new(pool: Pool) -> Self {
        PgDocumentStore { pool }
    }

    async fn client(&self) -> Result<Client, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

// Reads one nullable text column, reporting conversion failures instead of panicking.
fn column(row: &Row, id: &str, column: &'static str) -> Result<Option<String>, StoreError> {
    row.try_get(column).map_err(|e| StoreError::Decode {
        id: id.to_string(),
        column,
        message: e.to_string(),
    })
}

/// NULL lists and NULL elements are dropped rather than treated as errors.
fn participants(raw: Option<Vec<Option<String>>>) -> Vec<String> {
    raw.unwrap_or_default().into_iter().flatten().collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_chat(&self, chat_id: &str) -> Result<Option<Chat>, StoreError> {
        let query = "SELECT participant_ids FROM chats WHERE id = $1";

        let client = self.client().await?;
        let row = match client.query_opt(query, &[&chat_id]).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        let raw: Option<Vec<Option<String>>> =
            row.try_get("participant_ids").map_err(|e| StoreError::Decode {
                id: chat_id.to_string(),
                column: "participant_ids",
                message: e.to_string(),
            })?;

        Ok(Some(Chat {
            id: chat_id.to_string(),
            participant_ids: participants(raw),
        }))
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let query = "SELECT display_name, fcm_token FROM users WHERE id = $1";

        let client = self.client().await?;
        let row = match client.query_opt(query, &[&user_id]).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        Ok(Some(UserProfile {
            id: user_id.to_string(),
            display_name: column(&row, user_id, "display_name")?,
            fcm_token: column(&row, user_id, "fcm_token")?,
        }))
    }
}
