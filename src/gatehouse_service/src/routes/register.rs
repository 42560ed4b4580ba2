use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::RegisterUseCase;
use gatehouse_core::{CredentialStore, Identity, Password, TokenIssuer};

use super::{error::ApiError, login::SessionResponse};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// New accounts are logged in right away, mirroring login's response.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<C, I>(
    State((credential_store, token_issuer)): State<(C, I)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let identity = Identity::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(credential_store, token_issuer);
    let token = use_case.execute(identity, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: token.into_inner(),
        }),
    ))
}
