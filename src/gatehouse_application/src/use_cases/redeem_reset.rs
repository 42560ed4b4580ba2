use gatehouse_core::{
    CredentialStore, CredentialStoreError, Password, ResetTokenStore, ResetTokenStoreError,
    TokenValidator,
};

/// Error types for the redeem-reset use case
///
/// Every way a presented token can be bad (malformed, forged, expired,
/// unknown, already consumed) collapses into `InvalidOrExpiredToken` so the
/// boundary has a single 400 to map and nothing to leak.
#[derive(Debug, thiserror::Error)]
pub enum RedeemResetError {
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
    #[error("Reset token store error: {0}")]
    ResetTokenStoreError(ResetTokenStoreError),
}

/// Redeem-reset use case - second half of the password reset flow
pub struct RedeemResetUseCase<C, T, V>
where
    C: CredentialStore,
    T: ResetTokenStore,
    V: TokenValidator,
{
    credential_store: C,
    reset_token_store: T,
    token_validator: V,
}

impl<C, T, V> RedeemResetUseCase<C, T, V>
where
    C: CredentialStore,
    T: ResetTokenStore,
    V: TokenValidator,
{
    pub fn new(credential_store: C, reset_token_store: T, token_validator: V) -> Self {
        Self {
            credential_store,
            reset_token_store,
            token_validator,
        }
    }

    /// Execute the redeem-reset use case
    ///
    /// Consume-then-update: the record is taken with a compare-and-set so
    /// at most one concurrent redemption wins, and released again if the
    /// credential update cannot be applied - the two steps succeed or fail
    /// together as observed by later redemptions.
    #[tracing::instrument(name = "RedeemResetUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str, new_secret: Password) -> Result<(), RedeemResetError> {
        let claims = self
            .token_validator
            .validate_reset(token)
            .await
            .map_err(|_| RedeemResetError::InvalidOrExpiredToken)?;

        let record = match self.reset_token_store.consume(&claims.token_id).await {
            Ok(record) => record,
            Err(ResetTokenStoreError::TokenNotFound | ResetTokenStoreError::AlreadyConsumed) => {
                return Err(RedeemResetError::InvalidOrExpiredToken);
            }
            Err(e) => return Err(RedeemResetError::ResetTokenStoreError(e)),
        };

        if let Err(e) = self
            .credential_store
            .update_secret(&record.identity, new_secret)
            .await
        {
            if let Err(release_err) = self.reset_token_store.release(&record.id).await {
                tracing::error!(error = %release_err, "failed to release consumed reset token");
            }
            return Err(RedeemResetError::CredentialStoreError(e));
        }

        Ok(())
    }
}
