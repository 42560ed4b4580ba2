pub mod config;
pub mod notify;
pub mod persistence;
pub mod token;

// Re-export commonly used types for convenience
pub use config::{Settings, SettingsError};
pub use notify::{MockNotifier, PostmarkNotifier};
pub use persistence::{
    InMemoryCredentialStore, InMemoryResetTokenStore, InMemoryRevokedTokenStore,
    PostgresCredentialStore, PostgresResetTokenStore, RedisRevokedTokenStore,
};
pub use token::{JwtTokenIssuer, JwtTokenValidator, SigningKey, SigningKeys, TokenConfig};
