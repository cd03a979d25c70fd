//! # TokenAuth Core
//!
//! Core domain layer for the TokenAuth service: identity claims, the
//! stateless JWT codec, the session token service and the authentication
//! flow built on top of them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthResponse, ClaimSet, TokenKind, TokenPair, TokenValidation, VerifiedToken, ROLE_ADMIN,
    ROLE_USER,
};
pub use errors::{AuthError, DomainError, TokenError, ValidationError};
pub use services::{
    AuthService, AuthServiceConfig, Clock, CredentialVerifier, PermissiveVerifier, SystemClock,
    TokenCodec, TokenService, TokenServiceConfig,
};
