/// Signup and login handlers
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::user_repo,
    error::AppError,
    models::user::{LoginRequest, SignupRequest},
    security::{jwt, password},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public profile returned on login; the stored hash never leaves.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.username.is_empty()
        || payload.email.is_empty()
        || payload.password.is_empty()
        || payload.phone.is_empty()
    {
        return Err(AppError::BadRequest("missing required field".to_string()));
    }
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if user_repo::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("email already exists".to_string()));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = user_repo::create_user(
        &state.db,
        &payload.username,
        &payload.email,
        &password_hash,
        &payload.phone,
    )
    .await?;

    tracing::info!(username = %user.username, "user created");
    Ok(Json(json!({ "message": "user created successfully" })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = user_repo::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    password::verify_password(&payload.password, &user.password_hash)?;

    let token = jwt::issue_session_token(&state.config.jwt_secret, user.id, &user.username)?;

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
        },
    }))
}
