//! Typed extraction of the authenticated caller. Handlers take an
//! `AuthUser` argument instead of reaching into extensions themselves.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// The caller decoded from the session token by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// Identity string (username) trusted as embedded in the token.
    pub identity: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
