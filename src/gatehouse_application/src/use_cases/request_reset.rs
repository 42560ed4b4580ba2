use gatehouse_core::{
    CredentialStore, CredentialStoreError, Identity, Notifier, ResetTokenStore,
    ResetTokenStoreError, TokenError, TokenIssuer,
};

/// Error types for the request-reset use case
///
/// Notifier failures are deliberately absent: they are logged and
/// swallowed so the caller-visible outcome never depends on delivery.
#[derive(Debug, thiserror::Error)]
pub enum RequestResetError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Reset token store error: {0}")]
    ResetTokenStoreError(#[from] ResetTokenStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Request-reset use case - first half of the password reset flow
pub struct RequestResetUseCase<C, T, I, N>
where
    C: CredentialStore,
    T: ResetTokenStore,
    I: TokenIssuer,
    N: Notifier,
{
    credential_store: C,
    reset_token_store: T,
    token_issuer: I,
    notifier: N,
}

impl<C, T, I, N> RequestResetUseCase<C, T, I, N>
where
    C: CredentialStore,
    T: ResetTokenStore,
    I: TokenIssuer,
    N: Notifier,
{
    pub fn new(credential_store: C, reset_token_store: T, token_issuer: I, notifier: N) -> Self {
        Self {
            credential_store,
            reset_token_store,
            token_issuer,
            notifier,
        }
    }

    /// Execute the request-reset use case
    ///
    /// Succeeds whether or not the identity exists; an unknown identity is
    /// logged and otherwise indistinguishable from a known one. The raw
    /// token goes to the notifier only, never back to the caller.
    #[tracing::instrument(name = "RequestResetUseCase::execute", skip(self))]
    pub async fn execute(&self, identity: Identity) -> Result<(), RequestResetError> {
        if !self.credential_store.contains_identity(&identity).await? {
            tracing::debug!("password reset requested for unknown identity");
            return Ok(());
        }

        let issued = self.token_issuer.issue_reset(&identity)?;

        // The record must be durable before the token leaves the process.
        self.reset_token_store.store_token(issued.record).await?;

        if let Err(e) = self
            .notifier
            .send_reset_token(&identity, &issued.token)
            .await
        {
            tracing::warn!(error = %e, "failed to deliver reset token");
        }

        Ok(())
    }
}
