use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::notifier::{LogNotifier, TokenNotifier};
use crate::auth::repo::{PgUserStore, UserStore};
use crate::auth::services::AccountService;
use crate::messages::repo::{MessageStore, PgMessageStore};
use crate::messages::services::MessageService;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub board: MessageService,
}

impl AppState {
    pub fn postgres(db: PgPool) -> Self {
        Self::from_stores(
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgMessageStore::new(db)),
            Arc::new(LogNotifier),
        )
    }

    pub fn from_stores(
        users: Arc<dyn UserStore>,
        messages: Arc<dyn MessageStore>,
        notifier: Arc<dyn TokenNotifier>,
    ) -> Self {
        let accounts = AccountService::new(users, notifier);
        let board = MessageService::new(accounts.clone(), messages);
        Self { accounts, board }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(Default::default()).0
    }

    /// In-memory state plus handles on its message store and token outbox.
    #[cfg(test)]
    pub fn fake_with(
        messages: Arc<crate::memory::InMemoryMessageStore>,
    ) -> (Self, Arc<crate::memory::RecordingNotifier>) {
        use crate::memory::{InMemoryUserStore, RecordingNotifier};

        let outbox = Arc::new(RecordingNotifier::new());
        let state = Self::from_stores(
            Arc::new(InMemoryUserStore::new()),
            messages,
            outbox.clone(),
        );
        (state, outbox)
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for MessageService {
    fn from_ref(state: &AppState) -> Self {
        state.board.clone()
    }
}
