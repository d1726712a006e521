//! In-memory stores standing in for Postgres in tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::notifier::TokenNotifier;
use crate::auth::repo::UserStore;
use crate::auth::repo_types::{User, UserStatus};
use crate::auth::token::new_token;
use crate::error::StoreError;
use crate::messages::repo::{page_offset, MessageStore, PAGE_SIZE};
use crate::messages::repo_types::Message;

fn offline() -> StoreError {
    StoreError::Backend(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    offline: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(i64, String), StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::AlreadyExists);
        }
        let id = users.len() as i64 + 1;
        let token = new_token();
        users.push(User {
            id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash: String::new(),
            status: UserStatus::Blocked,
            location: String::new(),
            phone: String::new(),
            preferences: String::new(),
            one_time_token: Some(token.clone()),
        });
        Ok((id, token))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_by_email(
        &self,
        user: &User,
        expected_token: Option<&str>,
    ) -> Result<(), StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.email == user.email)
            .filter(|u| match expected_token {
                Some(t) => u.one_time_token.as_deref() == Some(t),
                None => true,
            })
            .ok_or(StoreError::NotFound)?;
        *stored = User {
            id: stored.id,
            ..user.clone()
        };
        Ok(())
    }

    async fn regenerate_token(&self, email: &str) -> Result<String, StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(StoreError::NotFound)?;
        let token = new_token();
        stored.status = UserStatus::Blocked;
        stored.one_time_token = Some(token.clone());
        Ok(token)
    }
}

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
    offline: AtomicBool,
    list_delay: Mutex<Option<Duration>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// Stalls every `list_page` call for `delay`.
    pub fn slow_listing(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, author: i64, title: &str, body: &str) -> Result<i64, StoreError> {
        self.check()?;
        let mut messages = self.messages.lock().unwrap();
        let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        messages.push(Message {
            id,
            author,
            title: title.to_string(),
            body: body.to_string(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn delete_by_author_and_title(&self, author: i64, title: &str) -> Result<(), StoreError> {
        self.check()?;
        self.messages
            .lock()
            .unwrap()
            .retain(|m| !(m.author == author && m.title == title));
        Ok(())
    }

    async fn list_page(&self, page: i64) -> Result<Vec<Message>, StoreError> {
        self.check()?;
        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut messages = self.messages.lock().unwrap().clone();
        messages.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(messages
            .into_iter()
            .skip(page_offset(page) as usize)
            .take(PAGE_SIZE as usize)
            .collect())
    }
}

/// Keeps every delivered token instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent token delivered to `email`.
    pub fn last_token(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl TokenNotifier for RecordingNotifier {
    async fn send_reset_token(&self, email: &str, token: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}
