use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header, errors::ErrorKind};
use secrecy::Secret;

use gatehouse_core::{
    Identity, ResetClaims, ResetTokenId, RevokedTokenStore, TokenError, TokenValidator,
};

use super::{
    claims::{ResetTokenClaims, SessionClaims},
    keyring::{SigningKey, SigningKeys},
};

/// Verifies HS256 tokens against the key ring: signature, expiry, and for
/// session tokens the revocation list.
#[derive(Clone)]
pub struct JwtTokenValidator<R> {
    keys: SigningKeys,
    revoked_token_store: R,
}

impl<R> JwtTokenValidator<R> {
    pub fn new(keys: SigningKeys, revoked_token_store: R) -> Self {
        Self {
            keys,
            revoked_token_store,
        }
    }

    fn verification_key(&self, token: &str) -> Result<SigningKey, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        let kid = header.kid.ok_or(TokenError::Malformed)?;
        self.keys.verification_key(&kid, Utc::now())
    }
}

fn decode_claims<C: serde::de::DeserializeOwned>(
    token: &str,
    key: &SigningKey,
) -> Result<C, TokenError> {
    decode::<C>(
        token,
        &DecodingKey::from_secret(key.secret_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

fn parse_subject(sub: Secret<String>) -> Result<Identity, TokenError> {
    Identity::try_from(sub).map_err(|_| TokenError::Malformed)
}

#[async_trait]
impl<R: RevokedTokenStore + Clone + 'static> TokenValidator for JwtTokenValidator<R> {
    async fn validate_session(&self, token: &str) -> Result<Identity, TokenError> {
        let key = self.verification_key(token)?;
        let claims: SessionClaims = decode_claims(token, &key)?;

        let is_revoked = self
            .revoked_token_store
            .is_revoked(token)
            .await
            .map_err(|e| TokenError::Unexpected(e.to_string()))?;

        if is_revoked {
            return Err(TokenError::Revoked);
        }

        parse_subject(claims.sub)
    }

    async fn validate_reset(&self, token: &str) -> Result<ResetClaims, TokenError> {
        let key = self.verification_key(token)?;
        let claims: ResetTokenClaims = decode_claims(token, &key)?;

        let token_id =
            ResetTokenId::parse(&claims.jti).map_err(|_| TokenError::Malformed)?;

        Ok(ResetClaims {
            identity: parse_subject(claims.sub)?,
            token_id,
        })
    }
}
