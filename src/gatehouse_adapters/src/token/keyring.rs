use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use gatehouse_core::TokenError;

/// One HMAC signing key; the id is stamped into token headers so the
/// validator can tell which key produced a given token.
#[derive(Debug, Clone)]
pub struct SigningKey {
    kid: String,
    secret: Secret<String>,
}

impl SigningKey {
    fn new(secret: Secret<String>) -> Self {
        Self {
            kid: Uuid::new_v4().to_string(),
            secret,
        }
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

struct KeyRing {
    current: SigningKey,
    retired: Option<(SigningKey, DateTime<Utc>)>,
}

/// Process-wide signing key state shared by issuer and validator.
///
/// Rotation is an atomic swap visible to all subsequent calls; the
/// outgoing key stays usable for verification - never for issuing - until
/// its grace deadline passes.
#[derive(Clone)]
pub struct SigningKeys {
    ring: Arc<ArcSwapOption<KeyRing>>,
}

impl SigningKeys {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            ring: Arc::new(ArcSwapOption::from_pointee(KeyRing {
                current: SigningKey::new(secret),
                retired: None,
            })),
        }
    }

    /// No key material loaded; issuing and validating fail with
    /// `SigningUnavailable` until `rotate` installs a key.
    pub fn unloaded() -> Self {
        Self {
            ring: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Random key for tests and single-process setups. Tokens signed with
    /// it do not survive a restart.
    pub fn ephemeral() -> Self {
        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        Self::new(Secret::from(secret))
    }

    pub fn current(&self) -> Result<SigningKey, TokenError> {
        self.ring
            .load()
            .as_ref()
            .map(|ring| ring.current.clone())
            .ok_or(TokenError::SigningUnavailable)
    }

    /// The key that may verify a token carrying `kid` at `now`: the
    /// current key, or the retired one while its grace window is open.
    pub fn verification_key(
        &self,
        kid: &str,
        now: DateTime<Utc>,
    ) -> Result<SigningKey, TokenError> {
        let guard = self.ring.load();
        let ring = guard.as_ref().ok_or(TokenError::SigningUnavailable)?;

        if ring.current.kid == kid {
            return Ok(ring.current.clone());
        }

        if let Some((retired, grace_until)) = &ring.retired {
            if retired.kid == kid && now <= *grace_until {
                return Ok(retired.clone());
            }
        }

        Err(TokenError::InvalidSignature)
    }

    /// Swap in a new signing key. The key that was current keeps verifying
    /// for `grace`; whatever was retired before is dropped outright.
    pub fn rotate(&self, secret: Secret<String>, grace: Duration) {
        let next = SigningKey::new(secret);
        let retired = self
            .ring
            .load_full()
            .map(|ring| (ring.current.clone(), Utc::now() + grace));

        self.ring.store(Some(Arc::new(KeyRing {
            current: next,
            retired,
        })));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(raw: &str) -> Secret<String> {
        Secret::from(raw.to_owned())
    }

    #[test]
    fn test_unloaded_ring_has_no_current_key() {
        let keys = SigningKeys::unloaded();
        assert_eq!(keys.current().unwrap_err(), TokenError::SigningUnavailable);
    }

    #[test]
    fn test_current_key_verifies_its_own_kid() {
        let keys = SigningKeys::new(secret("k1"));
        let current = keys.current().unwrap();

        let found = keys
            .verification_key(current.kid(), Utc::now())
            .unwrap();
        assert_eq!(found.kid(), current.kid());
    }

    #[test]
    fn test_unknown_kid_is_rejected() {
        let keys = SigningKeys::new(secret("k1"));
        let result = keys.verification_key("no-such-kid", Utc::now());
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_rotation_keeps_old_key_within_grace() {
        let keys = SigningKeys::new(secret("k1"));
        let old = keys.current().unwrap();

        keys.rotate(secret("k2"), Duration::minutes(5));

        assert_ne!(keys.current().unwrap().kid(), old.kid());
        assert!(keys.verification_key(old.kid(), Utc::now()).is_ok());
    }

    #[test]
    fn test_rotation_rejects_old_key_after_grace() {
        let keys = SigningKeys::new(secret("k1"));
        let old = keys.current().unwrap();

        // A grace window that ended in the past: the retired key is gone.
        keys.rotate(secret("k2"), Duration::seconds(-1));

        assert_eq!(
            keys.verification_key(old.kid(), Utc::now()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_second_rotation_drops_the_oldest_key() {
        let keys = SigningKeys::new(secret("k1"));
        let first = keys.current().unwrap();

        keys.rotate(secret("k2"), Duration::minutes(5));
        keys.rotate(secret("k3"), Duration::minutes(5));

        assert_eq!(
            keys.verification_key(first.kid(), Utc::now()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }
}
