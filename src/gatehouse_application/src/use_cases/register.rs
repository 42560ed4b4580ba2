use gatehouse_core::{
    CredentialStore, CredentialStoreError, Identity, Password, SessionToken, TokenError,
    TokenIssuer,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Register use case - stores new credentials and logs the account in
pub struct RegisterUseCase<C, I>
where
    C: CredentialStore,
    I: TokenIssuer,
{
    credential_store: C,
    token_issuer: I,
}

impl<C, I> RegisterUseCase<C, I>
where
    C: CredentialStore,
    I: TokenIssuer,
{
    pub fn new(credential_store: C, token_issuer: I) -> Self {
        Self {
            credential_store,
            token_issuer,
        }
    }

    /// Execute the register use case
    ///
    /// Fails with `DuplicateIdentity` when the identity is already taken;
    /// on success the new account gets a session token straight away.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, secret))]
    pub async fn execute(
        &self,
        identity: Identity,
        secret: Password,
    ) -> Result<SessionToken, RegisterError> {
        self.credential_store
            .add_credentials(identity.clone(), secret)
            .await?;

        let token = self.token_issuer.issue_session(&identity)?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use secrecy::{ExposeSecret, Secret};
    use tokio::sync::RwLock;

    use gatehouse_core::IssuedResetToken;

    use super::*;

    #[derive(Clone)]
    struct MockCredentialStore {
        records: Arc<RwLock<HashMap<String, String>>>,
    }

    #[async_trait::async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn add_credentials(
            &self,
            identity: Identity,
            secret: Password,
        ) -> Result<(), CredentialStoreError> {
            let key = identity.as_ref().expose_secret().clone();
            let mut records = self.records.write().await;
            if records.contains_key(&key) {
                return Err(CredentialStoreError::DuplicateIdentity);
            }
            records.insert(key, secret.as_ref().expose_secret().clone());
            Ok(())
        }

        async fn verify_credentials(
            &self,
            _identity: &Identity,
            _secret: &Password,
        ) -> Result<Identity, CredentialStoreError> {
            unimplemented!()
        }

        async fn update_secret(
            &self,
            _identity: &Identity,
            _new_secret: Password,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn contains_identity(
            &self,
            _identity: &Identity,
        ) -> Result<bool, CredentialStoreError> {
            unimplemented!()
        }
    }

    #[derive(Clone)]
    struct MockTokenIssuer;

    impl TokenIssuer for MockTokenIssuer {
        fn issue_session(&self, identity: &Identity) -> Result<SessionToken, TokenError> {
            Ok(SessionToken::new(format!(
                "session-for-{}",
                identity.as_ref().expose_secret()
            )))
        }

        fn issue_reset(&self, _identity: &Identity) -> Result<IssuedResetToken, TokenError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_register_success_issues_session_token() {
        let store = MockCredentialStore {
            records: Arc::new(RwLock::new(HashMap::new())),
        };
        let use_case = RegisterUseCase::new(store.clone(), MockTokenIssuer);

        let identity = Identity::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let secret = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let token = use_case.execute(identity, secret).await.unwrap();
        assert_eq!(token.as_str(), "session-for-test@example.com");
        assert!(store.records.read().await.contains_key("test@example.com"));
    }

    #[tokio::test]
    async fn test_register_duplicate_identity() {
        let mut initial = HashMap::new();
        initial.insert("test@example.com".to_string(), "password123".to_string());
        let store = MockCredentialStore {
            records: Arc::new(RwLock::new(initial)),
        };
        let use_case = RegisterUseCase::new(store, MockTokenIssuer);

        let identity = Identity::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let secret = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = use_case.execute(identity, secret).await;
        assert!(matches!(
            result,
            Err(RegisterError::CredentialStoreError(
                CredentialStoreError::DuplicateIdentity
            ))
        ));
    }
}
