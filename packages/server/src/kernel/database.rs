//! SQLite connection pool and schema migrations.

use std::str::FromStr;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 5;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool for `database_url`, creating the database file if it does not exist.
///
/// # Example URLs
/// - `sqlite://sqlite.db?mode=rwc` - File next to the working directory
/// - `sqlite::memory:` - In-memory database (ephemeral)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Every connection to `:memory:` is a separate database, so pin it to one connection
    if database_url.contains(":memory:") {
        return create_in_memory_pool().await;
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Create a single-connection in-memory pool (for testing).
///
/// The connection is never recycled: closing it would drop the database.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// How far a database is from the schema this build expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Embedded migrations recorded as applied
    pub applied_migrations: usize,
    pub expected_migrations: usize,
    /// Rows in `messages`, `None` while the table does not exist
    pub message_count: Option<i64>,
}

impl SchemaStatus {
    /// Every embedded migration ran and the guestbook table is readable
    pub fn is_current(&self) -> bool {
        self.applied_migrations == self.expected_migrations && self.message_count.is_some()
    }
}

async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(found > 0)
}

/// Compare the migrations recorded in the database with the embedded ones and
/// count stored messages.
pub async fn schema_status(pool: &SqlitePool) -> Result<SchemaStatus, sqlx::Error> {
    let applied = if table_exists(pool, "_sqlx_migrations").await? {
        sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success = 1")
            .fetch_all(pool)
            .await?
    } else {
        Vec::new()
    };

    let message_count = if table_exists(pool, "messages").await? {
        Some(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
                .fetch_one(pool)
                .await?,
        )
    } else {
        None
    };

    Ok(SchemaStatus {
        applied_migrations: MIGRATOR
            .iter()
            .filter(|migration| applied.contains(&migration.version))
            .count(),
        expected_migrations: MIGRATOR.iter().count(),
        message_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_create_the_messages_table() {
        let pool = create_in_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_in_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn schema_status_before_and_after_migrations() {
        let pool = create_in_memory_pool().await.unwrap();

        let fresh = schema_status(&pool).await.unwrap();
        assert_eq!(fresh.applied_migrations, 0);
        assert!(fresh.expected_migrations > 0);
        assert_eq!(fresh.message_count, None);
        assert!(!fresh.is_current());

        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO messages (author, content) VALUES ('a', 'b')")
            .execute(&pool)
            .await
            .unwrap();

        let migrated = schema_status(&pool).await.unwrap();
        assert_eq!(migrated.applied_migrations, migrated.expected_migrations);
        assert_eq!(migrated.message_count, Some(1));
        assert!(migrated.is_current());
    }

    #[tokio::test]
    async fn memory_url_shares_one_database() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO messages (author, content) VALUES ('a', 'b')")
            .execute(&pool)
            .await
            .unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
