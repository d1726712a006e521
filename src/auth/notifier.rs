use async_trait::async_trait;
use tracing::{debug, info};

/// Out-of-band delivery of one-time tokens to the account owner.
#[async_trait]
pub trait TokenNotifier: Send + Sync {
    async fn send_reset_token(&self, email: &str, token: &str) -> anyhow::Result<()>;
}

/// Writes the token to the server log in place of a mail transport.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl TokenNotifier for LogNotifier {
    async fn send_reset_token(&self, email: &str, token: &str) -> anyhow::Result<()> {
        info!(%email, "reset token issued");
        debug!(%email, %token, "reset token for delivery");
        Ok(())
    }
}
