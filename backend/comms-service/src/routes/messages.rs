use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    db::message_repo, error::AppError, middleware::guards::AuthUser, models::message::Message,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default, rename = "conversationSid")]
    pub conversation_sid: String,
    #[serde(default)]
    pub body: String,
}

/// POST /messages — append a message authored by the caller's identity.
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    if payload.conversation_sid.is_empty() || payload.body.is_empty() {
        return Err(AppError::BadRequest(
            "missing conversation or body".to_string(),
        ));
    }

    let message = message_repo::append(
        &state.db,
        &payload.conversation_sid,
        &user.identity,
        &payload.body,
    )
    .await?;

    Ok(Json(message))
}

/// GET /messages/:conversation_sid — full history, ascending by creation
/// time. Empty list if the conversation has no messages.
pub async fn get_messages(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(conversation_sid): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = message_repo::list_for_conversation(&state.db, &conversation_sid).await?;
    Ok(Json(messages))
}
