use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatehouse_application::RequestResetUseCase;
use gatehouse_core::{CredentialStore, Identity, Notifier, ResetTokenStore, TokenIssuer};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

/// Answers 200 whether or not the account exists; the reset token travels
/// through the notifier and never appears in the response.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<C, T, I, N>(
    State((credential_store, reset_token_store, token_issuer, notifier)): State<(C, T, I, N)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore + Clone + 'static,
    T: ResetTokenStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    let identity = Identity::try_from(request.email)?;

    let use_case =
        RequestResetUseCase::new(credential_store, reset_token_store, token_issuer, notifier);
    use_case.execute(identity).await?;

    Ok(StatusCode::OK)
}
