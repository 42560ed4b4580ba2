use gatehouse_core::{
    CredentialStore, CredentialStoreError, Identity, Password, SessionToken, TokenError,
    TokenIssuer,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Login use case - verifies credentials and issues a session token
pub struct LoginUseCase<C, I>
where
    C: CredentialStore,
    I: TokenIssuer,
{
    credential_store: C,
    token_issuer: I,
}

impl<C, I> LoginUseCase<C, I>
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

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `identity` - Account identifier
    /// * `secret` - Submitted secret, compared against the stored hash
    ///
    /// # Returns
    /// A freshly signed session token for the verified identity
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, secret))]
    pub async fn execute(
        &self,
        identity: Identity,
        secret: Password,
    ) -> Result<SessionToken, LoginError> {
        let verified = self
            .credential_store
            .verify_credentials(&identity, &secret)
            .await?;

        let token = self.token_issuer.issue_session(&verified)?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::IssuedResetToken;
    use secrecy::{ExposeSecret, Secret};

    // Mock implementations for testing
    #[derive(Clone)]
    struct MockCredentialStore {
        identity: String,
        secret: String,
    }

    #[async_trait::async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn add_credentials(
            &self,
            _identity: Identity,
            _secret: Password,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn verify_credentials(
            &self,
            identity: &Identity,
            secret: &Password,
        ) -> Result<Identity, CredentialStoreError> {
            if identity.as_ref().expose_secret() != &self.identity {
                return Err(CredentialStoreError::IdentityNotFound);
            }
            if secret.as_ref().expose_secret() != &self.secret {
                return Err(CredentialStoreError::IncorrectSecret);
            }
            Ok(identity.clone())
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

    fn store() -> MockCredentialStore {
        MockCredentialStore {
            identity: "test@example.com".to_string(),
            secret: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_returns_token_for_identity() {
        let use_case = LoginUseCase::new(store(), MockTokenIssuer);

        let identity = Identity::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let secret = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let token = use_case.execute(identity, secret).await.unwrap();
        assert_eq!(token.as_str(), "session-for-test@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_secret() {
        let use_case = LoginUseCase::new(store(), MockTokenIssuer);

        let identity = Identity::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let secret = Password::try_from(Secret::from("wrong-password".to_string())).unwrap();

        let result = use_case.execute(identity, secret).await;
        assert!(matches!(
            result,
            Err(LoginError::CredentialStoreError(
                CredentialStoreError::IncorrectSecret
            ))
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_identity() {
        let use_case = LoginUseCase::new(store(), MockTokenIssuer);

        let identity = Identity::try_from(Secret::from("ghost@example.com".to_string())).unwrap();
        let secret = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = use_case.execute(identity, secret).await;
        assert!(matches!(
            result,
            Err(LoginError::CredentialStoreError(
                CredentialStoreError::IdentityNotFound
            ))
        ));
    }
}
