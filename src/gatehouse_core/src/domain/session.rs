/// Signed, time-bounded proof of a prior successful authentication.
///
/// Opaque to everything but the issuer and validator; immutable once
/// issued and destroyed implicitly at expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
