pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    identity::{Identity, IdentityError},
    password::{Password, PasswordError},
    reset_token::{IssuedResetToken, ResetClaims, ResetTokenId, ResetTokenIdError, ResetTokenRecord},
    session::SessionToken,
};

pub use ports::{
    repositories::{
        CredentialStore, CredentialStoreError, ResetTokenStore, ResetTokenStoreError,
        RevokedTokenStore, RevokedTokenStoreError,
    },
    services::{Notifier, NotifyError},
};

pub use strategies::{
    token_issuer::{TokenError, TokenIssuer},
    token_validator::TokenValidator,
};
