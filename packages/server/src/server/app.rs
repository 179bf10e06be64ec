//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method, Uri},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::messages::{BaseMessageService, MessageService, SqliteMessageRepository};
use crate::server::routes::{
    create_message, delete_message, get_message, health_handler, list_messages, update_message,
};
use crate::server::static_files::serve_static;
use crate::server::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub message_service: Arc<dyn BaseMessageService>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, message_service: Arc<dyn BaseMessageService>) -> Self {
        Self {
            db_pool,
            message_service,
        }
    }

    /// Wire the production stack: SQLite repository behind the message service.
    pub fn from_pool(db_pool: SqlitePool) -> Self {
        let repository = Arc::new(SqliteMessageRepository::new(db_pool.clone()));
        let message_service = Arc::new(MessageService::new(repository));
        Self::new(db_pool, message_service)
    }
}

/// Routes of the versioned REST API, mounted under `/api/v1`
///
/// Unknown API paths answer with a JSON 404 instead of the front end.
fn api_routes() -> Router {
    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route(
            "/messages/:id",
            get(get_message).put(update_message).delete(delete_message),
        )
        .fallback(api_not_found)
}

async fn api_not_found(uri: Uri) -> ApiError {
    tracing::debug!(%uri, "no api route");
    ApiError::RouteNotFound
}

/// Build the Axum application router
///
/// Anything outside `/api/v1` that matches no route falls through to the
/// embedded front end.
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .nest("/api/v1", api_routes())
        // Health check
        .route("/health", get(health_handler))
        // SPA fallback for unmatched paths outside the API
        .fallback(serve_static)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
