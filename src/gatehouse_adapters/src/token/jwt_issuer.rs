use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use gatehouse_core::{
    Identity, IssuedResetToken, ResetTokenId, ResetTokenRecord, SessionToken, TokenError,
    TokenIssuer,
};

use super::{
    TokenConfig,
    claims::{ResetTokenClaims, SessionClaims},
    keyring::SigningKeys,
};

/// Issues HS256-signed session and reset tokens, key id in the header.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    keys: SigningKeys,
    config: TokenConfig,
}

impl JwtTokenIssuer {
    pub fn new(keys: SigningKeys, config: TokenConfig) -> Self {
        Self { keys, config }
    }

    fn sign<C: serde::Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        let key = self.keys.current()?;

        let mut header = Header::default();
        header.kid = Some(key.kid().to_owned());

        encode(&header, claims, &EncodingKey::from_secret(key.secret_bytes()))
            .map_err(|e| TokenError::Unexpected(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_session(&self, identity: &Identity) -> Result<SessionToken, TokenError> {
        let ttl = chrono::Duration::try_seconds(self.config.session_ttl_seconds).ok_or(
            TokenError::Unexpected("session TTL out of range".to_string()),
        )?;

        let issued_at = Utc::now();
        let claims = SessionClaims {
            sub: identity.as_ref().clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        self.sign(&claims).map(SessionToken::new)
    }

    fn issue_reset(&self, identity: &Identity) -> Result<IssuedResetToken, TokenError> {
        let ttl = chrono::Duration::try_seconds(self.config.reset_ttl_seconds).ok_or(
            TokenError::Unexpected("reset TTL out of range".to_string()),
        )?;

        let id = ResetTokenId::new();
        let issued_at = Utc::now();
        let expires_at = issued_at + ttl;

        let claims = ResetTokenClaims {
            sub: identity.as_ref().clone(),
            jti: id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.sign(&claims)?;

        Ok(IssuedResetToken {
            token,
            record: ResetTokenRecord {
                id,
                identity: identity.clone(),
                issued_at,
                expires_at,
                consumed: false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use secrecy::Secret;

    use super::*;

    fn identity() -> Identity {
        Identity::try_from(Secret::from("test@example.com".to_owned())).unwrap()
    }

    #[test]
    fn test_session_token_is_a_compact_jwt() {
        let issuer = JwtTokenIssuer::new(SigningKeys::ephemeral(), TokenConfig::default());

        let token = issuer.issue_session(&identity()).unwrap();
        assert_eq!(token.as_str().split('.').count(), 3);
    }

    #[test]
    fn test_issue_fails_without_a_signing_key() {
        let issuer = JwtTokenIssuer::new(SigningKeys::unloaded(), TokenConfig::default());

        assert_eq!(
            issuer.issue_session(&identity()).unwrap_err(),
            TokenError::SigningUnavailable
        );
        assert_eq!(
            issuer.issue_reset(&identity()).unwrap_err(),
            TokenError::SigningUnavailable
        );
    }

    #[test]
    fn test_reset_record_matches_the_configured_ttl() {
        let issuer = JwtTokenIssuer::new(SigningKeys::ephemeral(), TokenConfig::default());

        let issued = issuer.issue_reset(&identity()).unwrap();

        assert_eq!(issued.record.identity, identity());
        assert!(!issued.record.consumed);
        assert_eq!(
            issued.record.expires_at - issued.record.issued_at,
            Duration::seconds(900)
        );
    }

    #[test]
    fn test_reset_tokens_get_distinct_ids() {
        let issuer = JwtTokenIssuer::new(SigningKeys::ephemeral(), TokenConfig::default());

        let first = issuer.issue_reset(&identity()).unwrap();
        let second = issuer.issue_reset(&identity()).unwrap();

        assert_ne!(first.record.id, second.record.id);
        assert_ne!(first.token, second.token);
    }
}
