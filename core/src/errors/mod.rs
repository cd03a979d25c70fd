//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, RejectReason, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error stems from a client-supplied credential or token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomainError::Unauthorized
                | DomainError::Auth(AuthError::InvalidCredentials)
                | DomainError::Auth(AuthError::AuthenticationFailed)
                | DomainError::Token(TokenError::InvalidToken)
                | DomainError::Token(TokenError::InvalidRefreshToken)
        )
    }
}
