use std::sync::Arc;

use tokio::sync::RwLock;

use gatehouse_core::{Identity, Notifier, NotifyError};

/// Test double that records every delivery instead of sending anything.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    deliveries: Arc<RwLock<Vec<(Identity, String)>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails, for exercising the swallow path.
    pub fn failing() -> Self {
        Self {
            deliveries: Arc::default(),
            fail: true,
        }
    }

    pub async fn delivery_count(&self) -> usize {
        self.deliveries.read().await.len()
    }

    pub async fn last_delivery(&self) -> Option<(Identity, String)> {
        self.deliveries.read().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn send_reset_token(
        &self,
        recipient: &Identity,
        token: &str,
    ) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Delivery(
                "mock notifier configured to fail".to_string(),
            ));
        }
        self.deliveries
            .write()
            .await
            .push((recipient.clone(), token.to_owned()));
        Ok(())
    }
}
