use sqlx::PgPool;

use crate::error::AppError;
use crate::models::message::Message;

/// Append a message to a conversation. The database assigns the timestamp,
/// so ordering within a conversation follows write order.
pub async fn append(
    pool: &PgPool,
    conversation_sid: &str,
    author: &str,
    body: &str,
) -> Result<Message, AppError> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, conversation_sid, author, body)
        VALUES (gen_random_uuid(), $1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(conversation_sid)
    .bind(author)
    .bind(body)
    .fetch_one(pool)
    .await
    .map_err(AppError::Database)
}

/// All messages for a conversation, ascending by creation time. Unbounded:
/// no pagination.
pub async fn list_for_conversation(
    pool: &PgPool,
    conversation_sid: &str,
) -> Result<Vec<Message>, AppError> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT * FROM messages WHERE conversation_sid = $1 ORDER BY created_at ASC
        "#,
    )
    .bind(conversation_sid)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}
