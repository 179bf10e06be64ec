use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::{schema_status, SchemaStatus};
use crate::server::app::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    guestbook: Option<GuestbookHealth>,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

impl DatabaseHealth {
    fn ok() -> Self {
        Self {
            status: "ok",
            error: None,
        }
    }

    fn failed(reason: &'static str) -> Self {
        Self {
            status: "error",
            error: Some(reason),
        }
    }
}

/// Schema and content of the guestbook store
#[derive(Serialize)]
pub struct GuestbookHealth {
    applied_migrations: usize,
    expected_migrations: usize,
    messages: Option<i64>,
}

impl From<SchemaStatus> for GuestbookHealth {
    fn from(schema: SchemaStatus) -> Self {
        Self {
            applied_migrations: schema.applied_migrations,
            expected_migrations: schema.expected_migrations,
            messages: schema.message_count,
        }
    }
}

/// Health check endpoint
///
/// Healthy means the database answered within 5 seconds, every embedded
/// migration is recorded as applied and the `messages` table is readable.
/// Anything else is 503 Service Unavailable.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (database, guestbook) =
        match tokio::time::timeout(CHECK_TIMEOUT, schema_status(&state.db_pool)).await {
            Ok(Ok(schema)) if schema.is_current() => (DatabaseHealth::ok(), Some(schema.into())),
            Ok(Ok(schema)) => {
                tracing::warn!(
                    applied = schema.applied_migrations,
                    expected = schema.expected_migrations,
                    "guestbook schema is behind the embedded migrations"
                );
                (DatabaseHealth::failed("migrations pending"), Some(schema.into()))
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "health check query failed");
                (DatabaseHealth::failed("query failed"), None)
            }
            Err(_) => {
                tracing::error!(timeout = ?CHECK_TIMEOUT, "health check timed out");
                (DatabaseHealth::failed("query timeout"), None)
            }
        };

    let (status_code, status) = if database.error.is_none() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            guestbook,
        }),
    )
}
