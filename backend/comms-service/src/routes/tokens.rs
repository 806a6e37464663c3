/// Scoped-grant issuance for the real-time communications SDK
use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    error::AppError, middleware::guards::AuthUser, services::grants, state::AppState,
};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /token — chat-scoped grant for the caller's identity.
pub async fn chat_token(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TokenResponse>, AppError> {
    tracing::debug!(identity = %user.identity, "issuing chat grant");
    let token = grants::issue_chat_grant(&state.config.twilio, &user.identity)?;
    Ok(Json(TokenResponse { token }))
}

/// POST /voice-token — voice-scoped grant for the caller's identity.
pub async fn voice_token(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TokenResponse>, AppError> {
    tracing::debug!(identity = %user.identity, "issuing voice grant");
    let token = grants::issue_voice_grant(&state.config.twilio, &user.identity)?;
    Ok(Json(TokenResponse { token }))
}
