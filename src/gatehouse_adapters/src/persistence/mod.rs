pub mod in_memory_credential_store;
pub mod in_memory_reset_token_store;
pub mod in_memory_revoked_token_store;
mod password_hash;
pub mod postgres_credential_store;
pub mod postgres_reset_token_store;
pub mod redis_revoked_token_store;

pub use in_memory_credential_store::InMemoryCredentialStore;
pub use in_memory_reset_token_store::InMemoryResetTokenStore;
pub use in_memory_revoked_token_store::InMemoryRevokedTokenStore;
pub use postgres_credential_store::PostgresCredentialStore;
pub use postgres_reset_token_store::PostgresResetTokenStore;
pub use redis_revoked_token_store::RedisRevokedTokenStore;
