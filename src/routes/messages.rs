use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use crate::store::Message;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to create a message
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
    pub sender: String,
}

/// Narrow response for fetching a single message
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTextResponse {
    pub message_text: String,
}

/// List all messages in insertion order
/// GET /api/v1/messages
pub async fn list_messages(State(state): State<Arc<ServerState>>) -> Json<Vec<Message>> {
    Json(state.store.list())
}

/// Store a new message
/// POST /api/v1/messages
///
/// Any body that fails to parse is a 400; axum's default would answer 422
/// for well-formed JSON of the wrong shape.
pub async fn create_message(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|err| ServerError::BadRequest(err.body_text()))?;

    let message = state.store.add(request.text, request.sender);
    tracing::debug!(
        id = message.id,
        is_palindrome = message.is_palindrome,
        "message stored"
    );

    Ok(StatusCode::CREATED)
}

/// Fetch a single message's text by ID
/// GET /api/v1/messages/{id}
pub async fn get_message(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> ServerResult<Json<MessageTextResponse>> {
    let message = state.store.get_by_id(id)?;
    Ok(Json(MessageTextResponse {
        message_text: message.text,
    }))
}

/// Delete a message by ID
/// DELETE /api/v1/messages/{id}
pub async fn delete_message(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    state.store.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}
