use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::{User, UserProfile};

fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}

/// Create a new user. A unique-constraint violation (email, username, phone)
/// surfaces as Conflict; the signup handler additionally pre-checks the
/// email so the common case gets its specific message.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    phone: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, phone)
        VALUES (gen_random_uuid(), $1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .fetch_one(pool)
    .await
    .map_err(|e| map_unique_violation(e, "user already exists"))
}

/// Get user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)
}

/// Get user by username (the real-time platform identity)
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)
}

/// Public profiles of everyone except the caller.
pub async fn list_others(pool: &PgPool, caller_id: Uuid) -> Result<Vec<UserProfile>, AppError> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT username, email, phone FROM users WHERE id <> $1 ORDER BY username
        "#,
    )
    .bind(caller_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}

/// Set or replace the caller's push-delivery token. The token column is
/// UNIQUE, so a token already claimed by another user surfaces as Conflict.
pub async fn set_fcm_token(pool: &PgPool, user_id: Uuid, fcm_token: &str) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users SET fcm_token = $1 WHERE id = $2
        "#,
    )
    .bind(fcm_token)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| map_unique_violation(e, "push token already registered"))?;

    Ok(())
}
