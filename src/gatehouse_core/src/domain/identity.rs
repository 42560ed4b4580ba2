use std::{
    hash::{Hash, Hasher},
    sync::LazyLock,
};

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static IDENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("pattern compiles"));

#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("Identity is not a valid email address")]
    NotAnEmail,
}

/// Unique user-facing account identifier, email-shaped.
///
/// Wrapped in [`Secret`] so it never leaks through `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Identity(Secret<String>);

impl TryFrom<Secret<String>> for Identity {
    type Error = IdentityError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        if IDENTITY_PATTERN.is_match(raw.expose_secret()) {
            Ok(Self(raw))
        } else {
            Err(IdentityError::NotAnEmail)
        }
    }
}

impl AsRef<Secret<String>> for Identity {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
