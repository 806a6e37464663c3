use axum::{extract::State, Json};
use serde_json::json;

use crate::{
    db::user_repo, error::AppError, middleware::guards::AuthUser,
    models::user::SaveFcmTokenRequest, state::AppState,
};

/// POST /save-fcm-token — register or replace the caller's push-delivery
/// token so the call router can wake the device for inbound calls.
pub async fn save_fcm_token(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveFcmTokenRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.fcm_token.is_empty() {
        return Err(AppError::BadRequest("fcm token missing".to_string()));
    }

    user_repo::set_fcm_token(&state.db, user.id, &payload.fcm_token).await?;
    Ok(Json(json!({ "message": "fcm token saved" })))
}
