use std::sync::Arc;

use redis::{Commands, Connection};
use tokio::sync::RwLock;

use gatehouse_core::{RevokedTokenStore, RevokedTokenStoreError};

#[derive(Clone)]
pub struct RedisRevokedTokenStore {
    conn: Arc<RwLock<Connection>>,
    ttl_seconds: u64,
}

impl RedisRevokedTokenStore {
    /// `ttl_seconds` should match the session TTL: an entry only needs to
    /// outlive the token it shadows, so the list never outgrows the
    /// live-token population.
    pub fn new(conn: Arc<RwLock<Connection>>, ttl_seconds: u64) -> Self {
        Self { conn, ttl_seconds }
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for RedisRevokedTokenStore {
    async fn revoke(&self, token: String) -> Result<(), RevokedTokenStoreError> {
        let key = revocation_key(&token);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, self.ttl_seconds)
            .map_err(|e| RevokedTokenStoreError::Unavailable(e.to_string()))
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError> {
        let key = revocation_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| RevokedTokenStoreError::Unavailable(e.to_string()))
    }
}

// Key prefix keeps revocation entries from colliding with anything else
// sharing the database.
const REVOKED_SESSION_KEY_PREFIX: &str = "revoked_session:";

fn revocation_key(token: &str) -> String {
    format!("{}{}", REVOKED_SESSION_KEY_PREFIX, token)
}
