use std::collections::HashMap;
use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::RwLock;

use gatehouse_core::{CredentialStore, CredentialStoreError, Identity, Password};

use super::password_hash::{compute_secret_hash, verify_secret_hash};

/// Credential records keyed by identity, hashed exactly like the Postgres
/// store so the two are interchangeable behind the port.
#[derive(Default, Clone)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<HashMap<Identity, Secret<String>>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn add_credentials(
        &self,
        identity: Identity,
        secret: Password,
    ) -> Result<(), CredentialStoreError> {
        let secret_hash = compute_secret_hash(secret)
            .await
            .map_err(CredentialStoreError::Unexpected)?;

        let mut records = self.records.write().await;
        if records.contains_key(&identity) {
            return Err(CredentialStoreError::DuplicateIdentity);
        }
        records.insert(identity, secret_hash);
        Ok(())
    }

    async fn verify_credentials(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<Identity, CredentialStoreError> {
        let expected_hash = {
            let records = self.records.read().await;
            records
                .get(identity)
                .cloned()
                .ok_or(CredentialStoreError::IdentityNotFound)?
        };

        verify_secret_hash(expected_hash, secret.clone())
            .await
            .map_err(|_| CredentialStoreError::IncorrectSecret)?;

        Ok(identity.clone())
    }

    async fn update_secret(
        &self,
        identity: &Identity,
        new_secret: Password,
    ) -> Result<(), CredentialStoreError> {
        let secret_hash = compute_secret_hash(new_secret)
            .await
            .map_err(CredentialStoreError::Unexpected)?;

        let mut records = self.records.write().await;
        let stored = records
            .get_mut(identity)
            .ok_or(CredentialStoreError::IdentityNotFound)?;
        *stored = secret_hash;
        Ok(())
    }

    async fn contains_identity(&self, identity: &Identity) -> Result<bool, CredentialStoreError> {
        Ok(self.records.read().await.contains_key(identity))
    }
}

#[cfg(test)]
mod tests {
    use fake::{Fake, faker::internet::en::SafeEmail};

    use super::*;

    fn random_identity() -> Identity {
        let raw: String = SafeEmail().fake();
        Identity::try_from(Secret::from(raw)).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_add_then_verify() {
        let store = InMemoryCredentialStore::new();
        let identity = random_identity();

        store
            .add_credentials(identity.clone(), password("password123"))
            .await
            .unwrap();

        let verified = store
            .verify_credentials(&identity, &password("password123"))
            .await
            .unwrap();
        assert_eq!(verified, identity);
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_secret() {
        let store = InMemoryCredentialStore::new();
        let identity = random_identity();

        store
            .add_credentials(identity.clone(), password("password123"))
            .await
            .unwrap();

        let result = store
            .verify_credentials(&identity, &password("not-the-password"))
            .await;
        assert_eq!(result.unwrap_err(), CredentialStoreError::IncorrectSecret);
    }

    #[tokio::test]
    async fn test_verify_unknown_identity() {
        let store = InMemoryCredentialStore::new();

        let result = store
            .verify_credentials(&random_identity(), &password("password123"))
            .await;
        assert_eq!(result.unwrap_err(), CredentialStoreError::IdentityNotFound);
    }

    #[tokio::test]
    async fn test_duplicate_identity_is_rejected() {
        let store = InMemoryCredentialStore::new();
        let identity = random_identity();

        store
            .add_credentials(identity.clone(), password("password123"))
            .await
            .unwrap();

        let result = store
            .add_credentials(identity, password("other-password"))
            .await;
        assert_eq!(result.unwrap_err(), CredentialStoreError::DuplicateIdentity);
    }

    #[tokio::test]
    async fn test_update_secret_replaces_the_hash() {
        let store = InMemoryCredentialStore::new();
        let identity = random_identity();

        store
            .add_credentials(identity.clone(), password("old-password"))
            .await
            .unwrap();
        store
            .update_secret(&identity, password("new-password"))
            .await
            .unwrap();

        assert!(
            store
                .verify_credentials(&identity, &password("new-password"))
                .await
                .is_ok()
        );
        assert_eq!(
            store
                .verify_credentials(&identity, &password("old-password"))
                .await
                .unwrap_err(),
            CredentialStoreError::IncorrectSecret
        );
    }

    #[tokio::test]
    async fn test_update_secret_for_unknown_identity() {
        let store = InMemoryCredentialStore::new();

        let result = store
            .update_secret(&random_identity(), password("new-password"))
            .await;
        assert_eq!(result.unwrap_err(), CredentialStoreError::IdentityNotFound);
    }

    #[tokio::test]
    async fn test_contains_identity() {
        let store = InMemoryCredentialStore::new();
        let identity = random_identity();

        assert!(!store.contains_identity(&identity).await.unwrap());

        store
            .add_credentials(identity.clone(), password("password123"))
            .await
            .unwrap();

        assert!(store.contains_identity(&identity).await.unwrap());
    }
}
