use axum::{extract::State, Json};

use crate::{
    db::user_repo, error::AppError, middleware::guards::AuthUser, models::user::UserProfile,
    state::AppState,
};

/// GET /users — public profiles of everyone except the caller.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let users = user_repo::list_others(&state.db, user.id).await?;
    Ok(Json(users))
}
