use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use gatehouse_application::RedeemResetUseCase;
use gatehouse_core::{CredentialStore, Password, ResetTokenStore, TokenValidator};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Secret<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<C, T, V>(
    State((credential_store, reset_token_store, token_validator)): State<(C, T, V)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore + Clone + 'static,
    T: ResetTokenStore + Clone + 'static,
    V: TokenValidator + Clone + 'static,
{
    let new_password = Password::try_from(request.new_password)?;

    let use_case = RedeemResetUseCase::new(credential_store, reset_token_store, token_validator);
    use_case
        .execute(request.token.expose_secret(), new_password)
        .await?;

    Ok(StatusCode::OK)
}
