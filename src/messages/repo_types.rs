use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Posted note. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Message {
    #[sqlx(rename = "message_id")]
    pub id: i64,
    #[sqlx(rename = "created_by_user")]
    pub author: i64, // users.user_id
    pub title: String,
    #[sqlx(rename = "message")]
    pub body: String,
    #[sqlx(rename = "created_on_date")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
