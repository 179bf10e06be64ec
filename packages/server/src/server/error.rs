//! HTTP error mapping.
//!
//! Handlers are the only place an HTTP status is chosen. Clients get a generic
//! `{"error": "..."}` body; the underlying cause only goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domains::messages::ServiceError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("empty or invalid id")]
    InvalidId,

    #[error("invalid request")]
    InvalidRequest,

    #[error("message not found")]
    MessageNotFound,

    #[error("not found")]
    RouteNotFound,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::MessageNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            tracing::warn!(error = %err, "message not found");
            Self::MessageNotFound
        } else {
            tracing::error!(error = %err, "message operation failed");
            Self::Internal
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
