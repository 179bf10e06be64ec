//! Request extractors that turn malformed input into `400` responses.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::common::MessageId;
use crate::domains::messages::Validate;
use crate::server::error::ApiError;

/// The `:id` path segment parsed as a [`MessageId`].
///
/// Runs before any body extractor, so a bad id is rejected before the body is read.
#[derive(Debug, Clone, Copy)]
pub struct MessageIdPath(pub MessageId);

#[async_trait]
impl<S> FromRequestParts<S> for MessageIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to read id from path");
                ApiError::InvalidId
            })?;

        raw.parse::<MessageId>().map(Self).map_err(|e| {
            tracing::warn!(error = %e, id = %raw, "failed to parse id");
            ApiError::InvalidId
        })
    }
}

/// A JSON body that decoded and passed [`Validate`].
///
/// Unlike `axum::Json` the `Content-Type` header is not checked, and every failure
/// (unreadable body, bad JSON, wrong shape, failed validation) is the same `400`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read request body");
            ApiError::InvalidRequest
        })?;

        let value: T = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "failed to bind json");
            ApiError::InvalidRequest
        })?;

        value.validate().map_err(|e| {
            tracing::warn!(error = %e, "request failed validation");
            ApiError::InvalidRequest
        })?;

        Ok(Self(value))
    }
}
