use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use gatehouse_application::LogoutUseCase;
use gatehouse_core::{RevokedTokenStore, TokenValidator};

use super::error::ApiError;

/// Revoke the presented session token.
///
/// The token must still verify; an expired, forged or already-revoked
/// token gets the same 401 the protected routes would give it. A request
/// without a bearer header is rejected by the extractor with a 400.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<R, V>(
    State((revoked_token_store, token_validator)): State<(R, V)>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RevokedTokenStore + Clone + 'static,
    V: TokenValidator + Clone + 'static,
{
    let token = bearer.token().to_owned();

    token_validator.validate_session(&token).await?;

    let use_case = LogoutUseCase::new(revoked_token_store);
    use_case.execute(token).await?;

    Ok(StatusCode::OK)
}
