use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, middleware::guards::AuthUser, security::jwt, state::AppState};

/// Gate applied to every protected route: extract the bearer token, verify
/// it against the configured session secret and stash the caller in request
/// extensions for handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let claims = jwt::verify_session_token(&state.config.jwt_secret, token)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        id: user_id,
        identity: claims.identity,
    });

    Ok(next.run(req).await)
}
