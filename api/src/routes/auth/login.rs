use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::services::auth::CredentialVerifier;

use super::AppState;
use crate::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::handlers::error_handler::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "string (1-128 chars)"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 1800
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password length
/// - 401 Unauthorized: Credentials rejected by the verifier
/// - 503 Service Unavailable: Token signing or credential store failure
pub async fn login<V>(
    state: web::Data<AppState<V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    V: CredentialVerifier + 'static,
{
    if let Err(errors) = request.0.validate() {
        tracing::warn!("login_validation_failed");
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(TokenResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
