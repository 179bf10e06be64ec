//! Message persistence.
//!
//! [`BaseMessageRepository`] is the storage seam the service depends on;
//! [`SqliteMessageRepository`] is the production implementation over the
//! `messages` table. Deletes are hard deletes, so a removed row is gone from every
//! later read.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::common::MessageId;
use crate::domains::messages::errors::RepositoryError;
use crate::domains::messages::models::{Message, NewMessage};

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait BaseMessageRepository: Send + Sync {
    /// Insert a message and return the id storage assigned to it
    async fn create(&self, message: &NewMessage) -> Result<MessageId>;

    /// Fetch one message; `NotFound` if no row has this id
    async fn get(&self, id: MessageId) -> Result<Message>;

    /// Fetch every message in insertion order (empty when the table is)
    async fn get_all(&self) -> Result<Vec<Message>>;

    /// Replace author and content of the row with `message.id`; `NotFound` if there is none
    async fn update(&self, message: &Message) -> Result<()>;

    /// Remove the row with this id. Deleting a missing id succeeds.
    async fn delete(&self, id: MessageId) -> Result<()>;
}

// Row type for sqlx queries
#[derive(Debug, FromRow)]
struct MessageRow {
    id: i64,
    author: String,
    content: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            author: row.author,
            content: row.content,
        }
    }
}

/// SQLite-backed message repository.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseMessageRepository for SqliteMessageRepository {
    async fn create(&self, message: &NewMessage) -> Result<MessageId> {
        let result = sqlx::query("INSERT INTO messages (author, content) VALUES (?, ?)")
            .bind(&message.author)
            .bind(&message.content)
            .execute(&self.pool)
            .await?;

        let id = MessageId::new(result.last_insert_rowid());
        tracing::debug!(%id, "message created");
        Ok(id)
    }

    async fn get(&self, id: MessageId) -> Result<Message> {
        sqlx::query_as::<_, MessageRow>("SELECT id, author, content FROM messages WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?
            .map(Message::from)
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn get_all(&self) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, author, content FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn update(&self, message: &Message) -> Result<()> {
        let result = sqlx::query("UPDATE messages SET author = ?, content = ? WHERE id = ?")
            .bind(&message.author)
            .bind(&message.content)
            .bind(message.id.into_inner())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { id: message.id });
        }
        tracing::debug!(id = %message.id, "message updated");
        Ok(())
    }

    async fn delete(&self, id: MessageId) -> Result<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, rows = result.rows_affected(), "message deleted");
        Ok(())
    }
}
