use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{User, UserRow, UserStatus};
use crate::auth::token::new_token;
use crate::error::StoreError;

/// Persistence of user rows. No business rules live here.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a blocked user with a fresh token and no password.
    async fn create(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(i64, String), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Full-row update of every mutable column, keyed by `user.email`.
    /// With `expected_token` the write only lands while that token is still
    /// stored; otherwise it fails with `NotFound`.
    async fn update_by_email(
        &self,
        user: &User,
        expected_token: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Issues a fresh token and re-blocks the account.
    async fn regenerate_token(&self, email: &str) -> Result<String, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(i64, String), StoreError> {
        let token = new_token();
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, firstname, lastname, status, one_time_token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING user_id
            "#,
        )
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(UserStatus::Blocked.as_str())
        .bind(&token)
        .fetch_optional(&self.db)
        .await?;

        match id {
            Some(id) => Ok((id, token)),
            None => Err(StoreError::AlreadyExists),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, firstname, lastname, password, status,
                   one_time_token, location, phone, preferences
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)?;
        User::try_from(row)
    }

    async fn update_by_email(
        &self,
        user: &User,
        expected_token: Option<&str>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET status = $1, firstname = $2, lastname = $3, location = $4,
                phone = $5, password = $6, preferences = $7, one_time_token = $8
            WHERE email = $9 AND ($10::text IS NULL OR one_time_token = $10)
            "#,
        )
        .bind(user.status.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.location)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.preferences)
        .bind(user.one_time_token.as_deref())
        .bind(&user.email)
        .bind(expected_token)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn regenerate_token(&self, email: &str) -> Result<String, StoreError> {
        let token = new_token();
        let result = sqlx::query(
            r#"
            UPDATE users
            SET status = $1, one_time_token = $2
            WHERE email = $3
            "#,
        )
        .bind(UserStatus::Blocked.as_str())
        .bind(&token)
        .bind(email)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(token)
    }
}
