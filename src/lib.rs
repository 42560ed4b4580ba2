//! # Gatehouse - Session/Credential Issuance Library
//!
//! This is a facade crate that re-exports the public APIs of the gatehouse
//! components: credential verification, signed session-token issue and
//! validation, and the single-use password-reset token lifecycle.
//!
//! ## Structure
//!
//! - **Core domain types**: `Identity`, `Password`, `SessionToken`, `ResetTokenRecord`
//! - **Repository traits**: `CredentialStore`, `ResetTokenStore`, `RevokedTokenStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RequestResetUseCase`, etc.
//! - **Adapters**: `PostgresCredentialStore`, `JwtTokenIssuer`, `PostmarkNotifier`, etc.
//! - **Service**: `AuthService` - the assembled HTTP surface

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    Identity, IdentityError, IssuedResetToken, Password, PasswordError, ResetClaims, ResetTokenId,
    ResetTokenRecord, SessionToken, TokenError,
};

/// Repository and service trait definitions
pub mod ports {
    pub use gatehouse_core::{
        CredentialStore, CredentialStoreError, Notifier, NotifyError, ResetTokenStore,
        ResetTokenStoreError, RevokedTokenStore, RevokedTokenStoreError, TokenIssuer,
        TokenValidator,
    };
}

// Re-export the ports at root level
pub use ports::{
    CredentialStore, CredentialStoreError, Notifier, NotifyError, ResetTokenStore,
    ResetTokenStoreError, RevokedTokenStore, RevokedTokenStoreError, TokenIssuer, TokenValidator,
};

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

// Re-export use cases at root level
pub use gatehouse_application::{
    LoginUseCase, LogoutUseCase, RedeemResetUseCase, RegisterUseCase, RequestResetUseCase,
};

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Token issuing and validation
    pub mod token {
        pub use gatehouse_adapters::token::*;
    }

    /// Notifier implementations
    pub mod notify {
        pub use gatehouse_adapters::notify::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{
    InMemoryCredentialStore, InMemoryResetTokenStore, InMemoryRevokedTokenStore, JwtTokenIssuer,
    JwtTokenValidator, MockNotifier, PostgresCredentialStore, PostgresResetTokenStore,
    PostmarkNotifier, RedisRevokedTokenStore, Settings, SigningKeys, TokenConfig,
};

/// The assembled HTTP surface
pub use gatehouse_service::{AllowedOrigins, ApiError, AuthService};

// Re-export common external dependencies

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export the web framework for embedders nesting the router
pub use axum;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
