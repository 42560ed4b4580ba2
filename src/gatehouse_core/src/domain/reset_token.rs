use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::identity::Identity;

#[derive(Debug, Error, PartialEq)]
pub enum ResetTokenIdError {
    #[error("Reset token id is not a valid UUID")]
    InvalidUuid,
}

/// Single-use id binding a signed reset token to its stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetTokenId(Uuid);

impl ResetTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, ResetTokenIdError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ResetTokenIdError::InvalidUuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResetTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResetTokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-side state of one reset attempt.
///
/// A record is written when the token is issued and flipped to `consumed`
/// exactly once on redemption; a consumed or expired record never grants a
/// credential change.
#[derive(Debug, Clone)]
pub struct ResetTokenRecord {
    pub id: ResetTokenId,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

/// A freshly signed reset token together with the record to persist.
///
/// The raw token string goes to the notifier and nowhere else.
#[derive(Debug, Clone)]
pub struct IssuedResetToken {
    pub token: String,
    pub record: ResetTokenRecord,
}

/// Claims recovered from a signed reset token.
#[derive(Debug, Clone)]
pub struct ResetClaims {
    pub identity: Identity,
    pub token_id: ResetTokenId,
}
