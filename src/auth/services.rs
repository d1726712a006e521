use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::notifier::TokenNotifier;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::UserStore;
use crate::auth::repo_types::{User, UserStatus};
use crate::error::{AppError, StoreError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Optional overrides applied on token confirmation. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<String>,
}

fn pick(new: Option<&String>, old: String) -> String {
    match new {
        Some(v) if !v.is_empty() => v.clone(),
        _ => old,
    }
}

/// Applies `changes` over `stored`, activates the account and consumes the token.
fn merge(stored: User, changes: &ProfileChanges, password_hash: Option<String>) -> User {
    User {
        id: stored.id,
        email: stored.email,
        first_name: pick(changes.first_name.as_ref(), stored.first_name),
        last_name: pick(changes.last_name.as_ref(), stored.last_name),
        password_hash: password_hash.unwrap_or(stored.password_hash),
        status: UserStatus::Active,
        location: pick(changes.location.as_ref(), stored.location),
        phone: pick(changes.phone.as_ref(), stored.phone),
        preferences: pick(changes.preferences.as_ref(), stored.preferences),
        one_time_token: None,
    }
}

/// Signup, login and token-confirmed account changes.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn TokenNotifier>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, notifier: Arc<dyn TokenNotifier>) -> Self {
        Self { users, notifier }
    }

    /// Creates a blocked account. Returns the new id and its confirmation token.
    pub async fn signup(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(i64, String), AppError> {
        if email.trim().is_empty() || first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(AppError::Validation(
                "mandatory field missing: need firstname, lastname and email".into(),
            ));
        }
        if !is_valid_email(email) {
            return Err(AppError::Validation("invalid email".into()));
        }

        let (id, token) = self.users.create(email, first_name, last_name).await?;
        info!(user_id = id, %email, "user signed up");
        Ok((id, token))
    }

    /// Checks an email/password pair against an active account.
    ///
    /// Every way this can fail for the caller (unknown email, blocked account,
    /// no password set, wrong password) is reported as [`AppError::AuthFailed`].
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = match self.users.find_by_email(email).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                warn!(%email, "login unknown email");
                return Err(AppError::AuthFailed);
            }
            Err(e) => return Err(e.into()),
        };

        if user.status != UserStatus::Active {
            warn!(%email, user_id = user.id, "login on blocked account");
            return Err(AppError::AuthFailed);
        }

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => {
                warn!(%email, user_id = user.id, "login invalid password");
                Err(AppError::AuthFailed)
            }
            Err(e) => {
                warn!(%email, user_id = user.id, error = %e, "login against unusable hash");
                Err(AppError::AuthFailed)
            }
        }
    }

    /// Token confirmation after signup or a reset request.
    pub async fn reset(
        &self,
        email: &str,
        token: &str,
        changes: &ProfileChanges,
    ) -> Result<User, AppError> {
        let user = self.confirm(email, token, changes).await?;
        info!(user_id = user.id, %email, "account reset confirmed");
        Ok(user)
    }

    /// Token-gated profile edit. An active account stays active.
    pub async fn update(
        &self,
        email: &str,
        token: &str,
        changes: &ProfileChanges,
    ) -> Result<User, AppError> {
        let user = self.confirm(email, token, changes).await?;
        info!(user_id = user.id, %email, "profile updated");
        Ok(user)
    }

    /// Issues a fresh token and blocks the account until it is confirmed.
    ///
    /// The token goes to the owner through the notifier only, never back to the caller.
    pub async fn request_reset(&self, email: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::Validation("mandatory field missing: need email".into()));
        }
        let token = self.users.regenerate_token(email).await?;
        self.notifier.send_reset_token(email, &token).await?;
        info!(%email, "account blocked pending reset");
        Ok(())
    }

    async fn confirm(
        &self,
        email: &str,
        token: &str,
        changes: &ProfileChanges,
    ) -> Result<User, AppError> {
        if email.trim().is_empty() || token.trim().is_empty() {
            return Err(AppError::Validation(
                "mandatory field missing: need token and email".into(),
            ));
        }

        let stored = match self.users.find_by_email(email).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                warn!(%email, "confirmation for unknown email");
                return Err(AppError::AuthFailed);
            }
            Err(e) => return Err(e.into()),
        };

        // A mismatch aborts before anything is written.
        if stored.one_time_token.as_deref() != Some(token) {
            warn!(%email, user_id = stored.id, "token mismatch");
            return Err(AppError::AuthFailed);
        }

        let password_hash = match changes.password.as_deref() {
            Some(p) if !p.is_empty() => Some(hash_password(p)?),
            _ => None,
        };

        let user = merge(stored, changes, password_hash);
        // The write only lands while the row still holds the presented token.
        match self.users.update_by_email(&user, Some(token)).await {
            Ok(()) => Ok(user),
            Err(StoreError::NotFound) => {
                warn!(%email, user_id = user.id, "token consumed concurrently");
                Err(AppError::AuthFailed)
            }
            Err(e) => Err(e.into()),
        }
    }
}
