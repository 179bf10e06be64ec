//! Test harness backed by an in-memory SQLite database.
//!
//! Every test gets its own database with migrations applied, so tests never see
//! each other's rows and ids always start at 1.

use anyhow::{Context, Result};
use axum::Router;
use guestbook_core::kernel::{create_in_memory_pool, run_migrations};
use guestbook_core::server::{build_app, AppState};
use sqlx::SqlitePool;
use std::sync::Arc;
use test_context::AsyncTestContext;

use guestbook_core::domains::messages::BaseMessageService;

use super::ApiClient;

/// Initialize a tracing subscriber that respects RUST_LOG.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let client = ctx.client();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: SqlitePool,
    /// The full application router wired to `db_pool`.
    pub app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    /// Creates a fresh in-memory database and the production router on top of it.
    pub async fn new() -> Result<Self> {
        init_tracing();

        let db_pool = create_in_memory_pool()
            .await
            .context("Failed to open in-memory database")?;
        run_migrations(&db_pool)
            .await
            .context("Failed to run migrations")?;

        let app = build_app(AppState::from_pool(db_pool.clone()));
        Ok(Self { db_pool, app })
    }

    /// Get an HTTP client for this harness.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.app.clone())
    }
}

/// Router whose message service is `service`; the pool is never connected.
pub fn app_with_service(service: Arc<dyn BaseMessageService>) -> Router {
    init_tracing();

    let db_pool =
        SqlitePool::connect_lazy("sqlite::memory:").expect("lazy pool needs no connection");
    build_app(AppState::new(db_pool, service))
}
