use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_application::{
    LoginError, LogoutError, RedeemResetError, RegisterError, RequestResetError,
};
use gatehouse_core::{
    CredentialStoreError, IdentityError, PasswordError, ResetTokenStoreError,
    RevokedTokenStoreError, TokenError,
};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Boundary error: everything a route can fail with, mapped to an HTTP
/// status without leaking internal detail. Unknown identity and wrong
/// secret share one variant on purpose.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identity already registered")]
    DuplicateIdentity,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("Unexpected error")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The detail stays in the logs; the body carries the generic text.
        if let ApiError::ServiceUnavailable(detail) | ApiError::Unexpected(detail) = &self {
            tracing::error!(%detail, "request failed");
        }

        let status_code = match self {
            ApiError::InvalidInput(_) | ApiError::InvalidOrExpiredToken => {
                StatusCode::BAD_REQUEST
            }

            ApiError::DuplicateIdentity => StatusCode::CONFLICT,

            ApiError::InvalidCredentials | ApiError::AuthenticationFailed => {
                StatusCode::UNAUTHORIZED
            }

            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<CredentialStoreError> for ApiError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::DuplicateIdentity => ApiError::DuplicateIdentity,
            CredentialStoreError::IdentityNotFound | CredentialStoreError::IncorrectSecret => {
                ApiError::InvalidCredentials
            }
            CredentialStoreError::Unavailable(e) => ApiError::ServiceUnavailable(e),
            CredentialStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Malformed
            | TokenError::InvalidSignature
            | TokenError::Expired
            | TokenError::Revoked => ApiError::AuthenticationFailed,
            TokenError::SigningUnavailable => {
                ApiError::ServiceUnavailable("signing key not loaded".to_string())
            }
            TokenError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<ResetTokenStoreError> for ApiError {
    fn from(error: ResetTokenStoreError) -> Self {
        match error {
            ResetTokenStoreError::TokenNotFound | ResetTokenStoreError::AlreadyConsumed => {
                ApiError::InvalidOrExpiredToken
            }
            ResetTokenStoreError::Unavailable(e) => ApiError::ServiceUnavailable(e),
            ResetTokenStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<RevokedTokenStoreError> for ApiError {
    fn from(error: RevokedTokenStoreError) -> Self {
        match error {
            RevokedTokenStoreError::Unavailable(e) => ApiError::ServiceUnavailable(e),
            RevokedTokenStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::CredentialStoreError(e) => e.into(),
            LoginError::TokenError(e) => e.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::CredentialStoreError(e) => e.into(),
            RegisterError::TokenError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::RevokedTokenStoreError(e) => e.into(),
        }
    }
}

impl From<RequestResetError> for ApiError {
    fn from(error: RequestResetError) -> Self {
        match error {
            RequestResetError::CredentialStoreError(e) => e.into(),
            RequestResetError::ResetTokenStoreError(e) => e.into(),
            RequestResetError::TokenError(e) => e.into(),
        }
    }
}

impl From<RedeemResetError> for ApiError {
    fn from(error: RedeemResetError) -> Self {
        match error {
            RedeemResetError::InvalidOrExpiredToken => ApiError::InvalidOrExpiredToken,
            // The account behind the token is gone; to the caller that is
            // just another dead token.
            RedeemResetError::CredentialStoreError(CredentialStoreError::IdentityNotFound) => {
                ApiError::InvalidOrExpiredToken
            }
            RedeemResetError::CredentialStoreError(e) => e.into(),
            RedeemResetError::ResetTokenStoreError(e) => e.into(),
        }
    }
}
