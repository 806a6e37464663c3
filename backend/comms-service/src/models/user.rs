use chrono::{DateTime, Utc};
/// User model
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Full user row. Deliberately not `Serialize`: the password hash must never
/// leave the service, so responses go through the public DTOs below.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public profile fields, safe to return to other users.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveFcmTokenRequest {
    #[serde(default, rename = "fcmToken")]
    pub fcm_token: String,
}
