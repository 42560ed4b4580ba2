use std::sync::Arc;

use dashmap::DashMap;

use gatehouse_core::{ResetTokenId, ResetTokenRecord, ResetTokenStore, ResetTokenStoreError};

/// Reset token records keyed by single-use id.
///
/// `consume` flips the flag under the map's shard lock, so concurrent
/// redemptions of the same token resolve to exactly one winner.
#[derive(Default, Clone)]
pub struct InMemoryResetTokenStore {
    records: Arc<DashMap<ResetTokenId, ResetTokenRecord>>,
}

impl InMemoryResetTokenStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ResetTokenStore for InMemoryResetTokenStore {
    async fn store_token(&self, record: ResetTokenRecord) -> Result<(), ResetTokenStoreError> {
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn consume(&self, id: &ResetTokenId) -> Result<ResetTokenRecord, ResetTokenStoreError> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or(ResetTokenStoreError::TokenNotFound)?;

        if record.consumed {
            return Err(ResetTokenStoreError::AlreadyConsumed);
        }
        record.consumed = true;

        Ok(record.value().clone())
    }

    async fn release(&self, id: &ResetTokenId) -> Result<(), ResetTokenStoreError> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or(ResetTokenStoreError::TokenNotFound)?;
        record.consumed = false;
        Ok(())
    }
}
