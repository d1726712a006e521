use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::messages::repo_types::Message;

/// Rows per listing page.
pub const PAGE_SIZE: i64 = 50;

/// Offset of `page`; negative pages clamp to the first one.
pub fn page_offset(page: i64) -> i64 {
    page.max(0).saturating_mul(PAGE_SIZE)
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, author: i64, title: &str, body: &str) -> Result<i64, StoreError>;

    /// Removes every message of `author` titled `title`. Succeeds when nothing matched.
    async fn delete_by_author_and_title(&self, author: i64, title: &str) -> Result<(), StoreError>;

    /// One page of messages, newest first.
    async fn list_page(&self, page: i64) -> Result<Vec<Message>, StoreError>;
}

#[derive(Clone)]
pub struct PgMessageStore {
    db: PgPool,
}

impl PgMessageStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert(&self, author: i64, title: &str, body: &str) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO messages (created_by_user, title, message, created_on_date)
            VALUES ($1, $2, $3, now())
            RETURNING message_id
            "#,
        )
        .bind(author)
        .bind(title)
        .bind(body)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }

    async fn delete_by_author_and_title(&self, author: i64, title: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE created_by_user = $1 AND title = $2")
            .bind(author)
            .bind(title)
            .execute(&self.db)
            .await?;
        tracing::debug!(author, rows = result.rows_affected(), "messages deleted");
        Ok(())
    }

    async fn list_page(&self, page: i64) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, created_by_user, title, message, created_on_date
            FROM messages
            ORDER BY message_id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
