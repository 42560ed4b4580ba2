use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    identity::Identity,
    password::Password,
    reset_token::{ResetTokenId, ResetTokenRecord},
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Identity already registered")]
    DuplicateIdentity,
    #[error("Identity not found")]
    IdentityNotFound,
    #[error("Incorrect secret")]
    IncorrectSecret,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateIdentity, Self::DuplicateIdentity) => true,
            (Self::IdentityNotFound, Self::IdentityNotFound) => true,
            (Self::IncorrectSecret, Self::IncorrectSecret) => true,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Credential records keyed by identity. Implementations own the hashing;
/// a plaintext secret must never be written through this port.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn add_credentials(
        &self,
        identity: Identity,
        secret: Password,
    ) -> Result<(), CredentialStoreError>;

    /// Compare the submitted secret against the stored salted hash and
    /// return the verified identity.
    async fn verify_credentials(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<Identity, CredentialStoreError>;

    /// Replace the stored secret. Reached only through reset redemption.
    async fn update_secret(
        &self,
        identity: &Identity,
        new_secret: Password,
    ) -> Result<(), CredentialStoreError>;

    async fn contains_identity(&self, identity: &Identity) -> Result<bool, CredentialStoreError>;
}

// ResetTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum ResetTokenStoreError {
    #[error("Reset token not found")]
    TokenNotFound,
    #[error("Reset token already consumed")]
    AlreadyConsumed,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for ResetTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TokenNotFound, Self::TokenNotFound) => true,
            (Self::AlreadyConsumed, Self::AlreadyConsumed) => true,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn store_token(&self, record: ResetTokenRecord) -> Result<(), ResetTokenStoreError>;

    /// Atomically flip the record to consumed and return it. Exactly one
    /// of any number of concurrent callers wins per id.
    async fn consume(&self, id: &ResetTokenId) -> Result<ResetTokenRecord, ResetTokenStoreError>;

    /// Undo a `consume` whose follow-up credential update failed, so the
    /// token can be redeemed again.
    async fn release(&self, id: &ResetTokenId) -> Result<(), ResetTokenStoreError>;
}

// RevokedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedTokenStoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Session tokens invalidated before their expiry, i.e. by logout.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    async fn revoke(&self, token: String) -> Result<(), RevokedTokenStoreError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError>;
}
