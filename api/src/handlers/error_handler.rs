//! Maps domain errors and request validation failures to HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ta_core::errors::{AuthError, DomainError, TokenError};
use ta_shared::errors::{error_codes, ErrorResponse};

pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token";
pub const MSG_INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";
pub const MSG_UNAUTHORIZED: &str = "Could not validate credentials";
pub const MSG_SERVICE_UNAVAILABLE: &str = "Authentication service temporarily unavailable";
pub const MSG_INTERNAL_ERROR: &str = "An internal error occurred";

/// Builds a JSON error response with the given status
pub fn error_response(status: StatusCode, error: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(error, message))
}

/// Bearer challenge returned by protected endpoints
pub fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header(("WWW-Authenticate", "Bearer"))
        .json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}

/// Handle domain errors and convert them to appropriate HTTP responses.
///
/// Messages are fixed per category; causes go to the log only.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::Token(TokenError::InvalidRefreshToken) => {
            tracing::debug!(error = %error, "refresh_rejected");
            error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_INVALID,
                MSG_INVALID_REFRESH_TOKEN,
            )
        }
        DomainError::Token(TokenError::InvalidToken) => {
            tracing::debug!(error = %error, "token_rejected");
            error_response(StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID, MSG_INVALID_TOKEN)
        }
        DomainError::Auth(AuthError::InvalidCredentials) => error_response(
            StatusCode::UNAUTHORIZED,
            error_codes::AUTHENTICATION_FAILED,
            &AuthError::InvalidCredentials.to_string(),
        ),
        DomainError::Auth(AuthError::AuthenticationFailed) | DomainError::Unauthorized => {
            unauthorized(MSG_UNAUTHORIZED)
        }
        DomainError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
        }
        DomainError::ValidationErr(validation) => error_response(
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            &validation.to_string(),
        ),
        DomainError::Auth(AuthError::ServiceUnavailable)
        | DomainError::Token(TokenError::TokenGenerationFailed) => {
            tracing::error!(error = %error, "service_unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::SERVICE_UNAVAILABLE,
                MSG_SERVICE_UNAVAILABLE,
            )
        }
        DomainError::Token(TokenError::KeyLoadError { .. })
        | DomainError::Token(TokenError::UnsupportedAlgorithm { .. })
        | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "internal_error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                MSG_INTERNAL_ERROR,
            )
        }
    }
}

/// 400 response listing the failing fields
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), codes);
    }

    HttpResponse::BadRequest().json(response)
}

/// JSON body extractor error handler
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = error_response(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, &message);
    actix_web::error::InternalError::from_response(err, response).into()
}
