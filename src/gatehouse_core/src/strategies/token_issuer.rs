use thiserror::Error;

use crate::domain::{identity::Identity, reset_token::IssuedResetToken, session::SessionToken};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Token has been revoked")]
    Revoked,
    #[error("Signing key not loaded")]
    SigningUnavailable,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for TokenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Malformed, Self::Malformed) => true,
            (Self::InvalidSignature, Self::InvalidSignature) => true,
            (Self::Expired, Self::Expired) => true,
            (Self::Revoked, Self::Revoked) => true,
            (Self::SigningUnavailable, Self::SigningUnavailable) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Creates signed, time-bounded tokens.
///
/// Session and reset tokens carry distinct TTLs; the reset TTL is the
/// strictly shorter of the two. Issuing has no error path in normal
/// operation and fails with [`TokenError::SigningUnavailable`] only when
/// no signing key is loaded.
pub trait TokenIssuer: Send + Sync {
    fn issue_session(&self, identity: &Identity) -> Result<SessionToken, TokenError>;

    /// Sign a reset token and build the single-use record the caller must
    /// persist before handing the token to the notifier.
    fn issue_reset(&self, identity: &Identity) -> Result<IssuedResetToken, TokenError>;
}
