use axum::{extract::Extension, http::StatusCode, Json};

use crate::domains::messages::{
    BaseMessageService, MessageData, MessageIdData, MessageListData, MessageRequest,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{MessageIdPath, ValidatedJson};

/// `GET /api/v1/messages/:id`
pub async fn get_message(
    Extension(state): Extension<AppState>,
    MessageIdPath(id): MessageIdPath,
) -> Result<Json<MessageData>, ApiError> {
    let message = state.message_service.get(id).await?;
    Ok(Json(message.into()))
}

/// `GET /api/v1/messages`
pub async fn list_messages(
    Extension(state): Extension<AppState>,
) -> Result<Json<MessageListData>, ApiError> {
    let messages = state.message_service.get_all().await?;
    Ok(Json(messages.into()))
}

/// `POST /api/v1/messages`
pub async fn create_message(
    Extension(state): Extension<AppState>,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<(StatusCode, Json<MessageIdData>), ApiError> {
    let id = state
        .message_service
        .create(request.into_new_message())
        .await?;

    tracing::info!(%id, "message created");
    Ok((StatusCode::CREATED, Json(id.into())))
}

/// `PUT /api/v1/messages/:id`
///
/// The path id wins over anything in the body.
pub async fn update_message(
    Extension(state): Extension<AppState>,
    MessageIdPath(id): MessageIdPath,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<Json<MessageIdData>, ApiError> {
    state
        .message_service
        .update(request.into_message(id))
        .await?;

    tracing::info!(%id, "message updated");
    Ok(Json(id.into()))
}

/// `DELETE /api/v1/messages/:id`
pub async fn delete_message(
    Extension(state): Extension<AppState>,
    MessageIdPath(id): MessageIdPath,
) -> Result<Json<MessageIdData>, ApiError> {
    state.message_service.delete(id).await?;

    tracing::info!(%id, "message deleted");
    Ok(Json(id.into()))
}
