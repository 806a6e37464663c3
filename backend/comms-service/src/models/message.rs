use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored chat message. Immutable once created; the timestamp is assigned
/// by the database at insert time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    #[serde(rename = "conversationSid")]
    pub conversation_sid: String,
    pub author: String,
    pub body: String,
    #[serde(rename = "dateCreated")]
    pub created_at: DateTime<Utc>,
}
