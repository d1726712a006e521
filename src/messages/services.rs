use std::sync::Arc;

use tracing::info;

use crate::auth::services::AccountService;
use crate::error::AppError;
use crate::messages::repo::MessageStore;
use crate::messages::repo_types::Message;

/// Credential-gated posting, deletion and listing.
#[derive(Clone)]
pub struct MessageService {
    accounts: AccountService,
    messages: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(accounts: AccountService, messages: Arc<dyn MessageStore>) -> Self {
        Self { accounts, messages }
    }

    pub async fn post(
        &self,
        email: &str,
        password: &str,
        title: &str,
        body: &str,
    ) -> Result<i64, AppError> {
        let user = self.accounts.login(email, password).await?;
        if title.trim().is_empty() {
            return Err(AppError::Validation("mandatory field missing: need title".into()));
        }
        let id = self.messages.insert(user.id, title, body).await?;
        info!(user_id = user.id, message_id = id, "message posted");
        Ok(id)
    }

    /// Deleting a title the user never posted is not an error.
    pub async fn delete(&self, email: &str, password: &str, title: &str) -> Result<(), AppError> {
        let user = self.accounts.login(email, password).await?;
        self.messages
            .delete_by_author_and_title(user.id, title)
            .await?;
        info!(user_id = user.id, %title, "message deleted");
        Ok(())
    }

    pub async fn list_recent(
        &self,
        email: &str,
        password: &str,
        page: i64,
    ) -> Result<Vec<Message>, AppError> {
        self.accounts.login(email, password).await?;
        Ok(self.messages.list_page(page).await?)
    }
}
