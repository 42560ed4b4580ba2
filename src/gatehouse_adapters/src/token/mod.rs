mod claims;
pub mod jwt_issuer;
pub mod jwt_validator;
pub mod keyring;

pub use jwt_issuer::JwtTokenIssuer;
pub use jwt_validator::JwtTokenValidator;
pub use keyring::{SigningKey, SigningKeys};

/// TTLs for the two token kinds, in seconds.
///
/// The reset TTL is the short one; settings loading rejects anything else.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub session_ttl_seconds: i64,
    pub reset_ttl_seconds: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 3600,
            reset_ttl_seconds: 900,
        }
    }
}
