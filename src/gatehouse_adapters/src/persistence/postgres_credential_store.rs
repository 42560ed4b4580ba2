use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres, Row};

use gatehouse_core::{CredentialStore, CredentialStoreError, Identity, Password};

use super::password_hash::{compute_secret_hash, verify_secret_hash};

#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Adding credentials to PostgreSQL", skip_all)]
    async fn add_credentials(
        &self,
        identity: Identity,
        secret: Password,
    ) -> Result<(), CredentialStoreError> {
        let secret_hash = compute_secret_hash(secret)
            .await
            .map_err(CredentialStoreError::Unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO credentials (identity, secret_hash)
                VALUES ($1, $2)
            "#,
        )
        .bind(identity.as_ref().expose_secret().as_str())
        .bind(secret_hash.expose_secret().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::DuplicateIdentity;
                }
            }
            store_error(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Verifying credentials in PostgreSQL", skip_all)]
    async fn verify_credentials(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<Identity, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT secret_hash
                FROM credentials
                WHERE identity = $1
            "#,
        )
        .bind(identity.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::IdentityNotFound);
        };

        let secret_hash: String = row
            .try_get("secret_hash")
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        verify_secret_hash(Secret::from(secret_hash), secret.clone())
            .await
            .map_err(|_| CredentialStoreError::IncorrectSecret)?;

        Ok(identity.clone())
    }

    #[tracing::instrument(name = "Updating secret in PostgreSQL", skip_all)]
    async fn update_secret(
        &self,
        identity: &Identity,
        new_secret: Password,
    ) -> Result<(), CredentialStoreError> {
        let secret_hash = compute_secret_hash(new_secret)
            .await
            .map_err(CredentialStoreError::Unexpected)?;

        let result = sqlx::query(
            r#"
                UPDATE credentials
                SET secret_hash = $1
                WHERE identity = $2
            "#,
        )
        .bind(secret_hash.expose_secret().as_str())
        .bind(identity.as_ref().expose_secret().as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::IdentityNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Looking up identity in PostgreSQL", skip_all)]
    async fn contains_identity(&self, identity: &Identity) -> Result<bool, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT identity
                FROM credentials
                WHERE identity = $1
            "#,
        )
        .bind(identity.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.is_some())
    }
}

fn store_error(e: sqlx::Error) -> CredentialStoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            CredentialStoreError::Unavailable(e.to_string())
        }
        other => CredentialStoreError::Unexpected(other.to_string()),
    }
}
