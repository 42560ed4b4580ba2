use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};

/// Claims carried by a session token.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct SessionClaims {
    pub sub: Secret<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Serialize for SessionClaims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SessionClaims", 3)?;
        state.serialize_field("sub", &self.sub.expose_secret())?;
        state.serialize_field("iat", &self.iat)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}

/// Claims carried by a reset token; `jti` is the stored single-use id.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ResetTokenClaims {
    pub sub: Secret<String>,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Serialize for ResetTokenClaims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ResetTokenClaims", 4)?;
        state.serialize_field("sub", &self.sub.expose_secret())?;
        state.serialize_field("jti", &self.jti)?;
        state.serialize_field("iat", &self.iat)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}
