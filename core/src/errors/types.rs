//! Error types for authentication, token handling and input validation

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    AuthenticationFailed,

    #[error("Authentication service temporarily unavailable")]
    ServiceUnavailable,
}

/// Token-related errors.
///
/// Rejections of client-supplied tokens surface only as `InvalidToken` or
/// `InvalidRefreshToken`; the underlying cause is a [`RejectReason`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Failed to load signing key: {message}")]
    KeyLoadError { message: String },

    #[error("Unsupported signing algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },
}

/// Why a token was rejected. Recorded in logs for operators only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("malformed token: {message}")]
    Malformed { message: String },

    #[error("signature verification failed")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("missing required claim: {claim}")]
    MissingClaim { claim: &'static str },

    #[error("wrong token kind: expected {expected}")]
    WrongKind { expected: &'static str },
}

impl From<jsonwebtoken::errors::Error> for RejectReason {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => RejectReason::BadSignature,
            ErrorKind::ExpiredSignature => RejectReason::Expired,
            _ => RejectReason::Malformed {
                message: err.to_string(),
            },
        }
    }
}

/// Validation errors for caller-supplied data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_rejection_message_is_generic() {
        assert_eq!(
            TokenError::InvalidRefreshToken.to_string(),
            "Invalid or expired refresh token"
        );
    }

    #[test]
    fn test_reject_reason_from_jwt_error() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        let bad_sig: RejectReason = Error::from(ErrorKind::InvalidSignature).into();
        assert_eq!(bad_sig, RejectReason::BadSignature);

        let malformed: RejectReason = Error::from(ErrorKind::InvalidToken).into();
        assert!(matches!(malformed, RejectReason::Malformed { .. }));
    }

    #[test]
    fn test_missing_claim_message() {
        let reason = RejectReason::MissingClaim { claim: "role" };
        assert_eq!(reason.to_string(), "missing required claim: role");
    }
}
