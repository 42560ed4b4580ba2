use async_trait::async_trait;

use crate::{
    domain::{identity::Identity, reset_token::ResetClaims},
    strategies::token_issuer::TokenError,
};

/// Verifies signature, expiry and revocation status of presented tokens.
///
/// Validation is stateless apart from the revocation lookup, so it is
/// safely parallelizable. A token signed by a non-current key is rejected
/// unless that key is still within its rotation grace window.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate_session(&self, token: &str) -> Result<Identity, TokenError>;

    /// Reset tokens skip the revocation list; single-use enforcement lives
    /// in the reset token store.
    async fn validate_reset(&self, token: &str) -> Result<ResetClaims, TokenError>;
}
