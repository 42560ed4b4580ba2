use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use gatehouse_core::Password;
use secrecy::{ExposeSecret, Secret};

// Hashing is CPU-bound; both helpers run it off the async worker threads.

#[tracing::instrument(name = "Computing secret hash", skip_all)]
pub(crate) async fn compute_secret_hash(secret: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(secret.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Verifying secret hash", skip_all)]
pub(crate) async fn verify_secret_hash(
    expected_secret_hash: Secret<String>,
    secret_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_secret_hash: PasswordHash<'_> =
                PasswordHash::new(expected_secret_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                secret_candidate.as_ref().expose_secret().as_bytes(),
                &expected_secret_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify_round_trip() {
        let hash = compute_secret_hash(password("correct horse battery"))
            .await
            .unwrap();

        verify_secret_hash(hash, password("correct horse battery"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_secret() {
        let hash = compute_secret_hash(password("correct horse battery"))
            .await
            .unwrap();

        let result = verify_secret_hash(hash, password("incorrect horse")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = compute_secret_hash(password("correct horse battery"))
            .await
            .unwrap();
        let second = compute_secret_hash(password("correct horse battery"))
            .await
            .unwrap();

        assert_ne!(first.expose_secret(), second.expose_secret());
    }
}
