use async_trait::async_trait;
use thiserror::Error;

use crate::domain::identity::Identity;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound channel carrying a freshly issued reset token to its owner.
///
/// The reset coordinator logs and swallows delivery failures so the HTTP
/// surface never reveals whether an identity exists.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_reset_token(
        &self,
        recipient: &Identity,
        token: &str,
    ) -> Result<(), NotifyError>;
}
