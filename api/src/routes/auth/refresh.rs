use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use ta_core::services::auth::CredentialVerifier;
use ta_shared::errors::error_codes;

use super::AppState;
use crate::dto::auth_dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error_handler::{error_response, handle_domain_error, MSG_INVALID_REFRESH_TOKEN};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access token.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Same shape as the login response. The refresh token is a new one when
/// rotation is enabled.
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired or non-refresh token
pub async fn refresh_token<V>(
    state: web::Data<AppState<V>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    V: CredentialVerifier + 'static,
{
    // Too short to be a token at all
    if request.0.validate().is_err() {
        return error_response(
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            MSG_INVALID_REFRESH_TOKEN,
        );
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(TokenResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
