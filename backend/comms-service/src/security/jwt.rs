use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Session lifetime: seven days from issuance.
const SESSION_TTL_DAYS: i64 = 7;

/// Claims embedded in a session token. Handlers trust `identity` without
/// re-reading the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id (UUID string).
    pub sub: String,
    /// Username, used as the real-time platform identity.
    pub identity: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a session token bound to a user.
pub fn issue_session_token(
    secret: &str,
    user_id: Uuid,
    identity: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        identity: identity.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))
}

/// Verify a session token. Any failure (signature, shape, expiry) is
/// indistinguishable to the caller: the session is simply not valid.
pub fn verify_session_token(secret: &str, token: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}
