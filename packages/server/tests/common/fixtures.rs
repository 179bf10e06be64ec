//! Test fixtures for creating messages directly in the database.

use anyhow::Result;
use guestbook_core::common::MessageId;
use guestbook_core::domains::messages::{
    BaseMessageRepository, Message, NewMessage, SqliteMessageRepository,
};
use sqlx::SqlitePool;

/// Insert a message without going through HTTP
pub async fn create_test_message(
    pool: &SqlitePool,
    author: &str,
    content: &str,
) -> Result<MessageId> {
    let repo = SqliteMessageRepository::new(pool.clone());
    Ok(repo.create(&NewMessage::new(author, content)).await?)
}

/// Read every stored message without going through HTTP
pub async fn stored_messages(pool: &SqlitePool) -> Result<Vec<Message>> {
    let repo = SqliteMessageRepository::new(pool.clone());
    Ok(repo.get_all().await?)
}
