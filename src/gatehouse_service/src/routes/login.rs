use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use gatehouse_application::LoginUseCase;
use gatehouse_core::{CredentialStore, Identity, Password, TokenIssuer};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Session token as returned by login and register.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<C, I>(
    State((credential_store, token_issuer)): State<(C, I)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let identity = Identity::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(credential_store, token_issuer);
    let token = use_case.execute(identity, password).await?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            token: token.into_inner(),
        }),
    ))
}
