use chrono::{DateTime, Utc};
use secrecy::Secret;
use sqlx::{PgPool, Pool, Postgres, Row};

use gatehouse_core::{
    Identity, ResetTokenId, ResetTokenRecord, ResetTokenStore, ResetTokenStoreError,
};

#[derive(Clone)]
pub struct PostgresResetTokenStore {
    pool: PgPool,
}

impl PostgresResetTokenStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresResetTokenStore { pool }
    }
}

#[async_trait::async_trait]
impl ResetTokenStore for PostgresResetTokenStore {
    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip_all)]
    async fn store_token(&self, record: ResetTokenRecord) -> Result<(), ResetTokenStoreError> {
        use secrecy::ExposeSecret;

        sqlx::query(
            r#"
                INSERT INTO reset_tokens (id, identity, issued_at, expires_at, consumed)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*record.id.as_uuid())
        .bind(record.identity.as_ref().expose_secret().as_str())
        .bind(record.issued_at)
        .bind(record.expires_at)
        .bind(record.consumed)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    // The conditional UPDATE is the compare-and-set: of any number of
    // concurrent redemptions, the database lets exactly one row through.
    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume(&self, id: &ResetTokenId) -> Result<ResetTokenRecord, ResetTokenStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE reset_tokens
                SET consumed = TRUE
                WHERE id = $1 AND consumed = FALSE
                RETURNING identity, issued_at, expires_at
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        let Some(row) = row else {
            // Nothing matched: either the id is unknown or someone else won.
            let exists = sqlx::query("SELECT id FROM reset_tokens WHERE id = $1")
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

            return Err(if exists.is_some() {
                ResetTokenStoreError::AlreadyConsumed
            } else {
                ResetTokenStoreError::TokenNotFound
            });
        };

        let identity_raw: String = row
            .try_get("identity")
            .map_err(|e| ResetTokenStoreError::Unexpected(e.to_string()))?;
        let identity = Identity::try_from(Secret::from(identity_raw))
            .map_err(|e| ResetTokenStoreError::Unexpected(e.to_string()))?;
        let issued_at: DateTime<Utc> = row
            .try_get("issued_at")
            .map_err(|e| ResetTokenStoreError::Unexpected(e.to_string()))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| ResetTokenStoreError::Unexpected(e.to_string()))?;

        Ok(ResetTokenRecord {
            id: id.clone(),
            identity,
            issued_at,
            expires_at,
            consumed: true,
        })
    }

    #[tracing::instrument(name = "Releasing reset token in PostgreSQL", skip_all)]
    async fn release(&self, id: &ResetTokenId) -> Result<(), ResetTokenStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE reset_tokens
                SET consumed = FALSE
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(ResetTokenStoreError::TokenNotFound);
        }

        Ok(())
    }
}

fn store_error(e: sqlx::Error) -> ResetTokenStoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ResetTokenStoreError::Unavailable(e.to_string())
        }
        other => ResetTokenStoreError::Unexpected(other.to_string()),
    }
}
