use gatehouse_core::{RevokedTokenStore, RevokedTokenStoreError};

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Revoked token store error: {0}")]
    RevokedTokenStoreError(#[from] RevokedTokenStoreError),
}

/// Logout use case - invalidates a session token before its expiry
pub struct LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    revoked_token_store: R,
}

impl<R> LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    pub fn new(revoked_token_store: R) -> Self {
        Self {
            revoked_token_store,
        }
    }

    /// Execute the logout use case
    ///
    /// The token stays on the revocation list until it would have expired
    /// anyway, after which the validator's expiry check takes over.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self, token))]
    pub async fn execute(&self, token: String) -> Result<(), LogoutError> {
        self.revoked_token_store.revoke(token).await?;

        Ok(())
    }
}
