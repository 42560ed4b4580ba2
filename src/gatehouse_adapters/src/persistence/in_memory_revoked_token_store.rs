use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use gatehouse_core::{RevokedTokenStore, RevokedTokenStoreError};

/// Revocation list for single-process setups and tests. Entries live until
/// the process exits; the Redis store is the bounded alternative.
#[derive(Default, Clone)]
pub struct InMemoryRevokedTokenStore {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevokedTokenStore {
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for InMemoryRevokedTokenStore {
    async fn revoke(&self, token: String) -> Result<(), RevokedTokenStoreError> {
        self.revoked.write().await.insert(token);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError> {
        Ok(self.revoked.read().await.contains(token))
    }
}
