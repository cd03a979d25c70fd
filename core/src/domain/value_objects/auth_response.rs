//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::{TokenPair, BEARER_TOKEN_TYPE};

/// Authentication response containing the issued tokens
///
/// Returned after a successful login or refresh exchange:
/// - JWT access and refresh tokens
/// - Token type, always `"bearer"`
/// - Access token lifetime in seconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Token type
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates a bearer authentication response
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

impl From<TokenPair> for AuthResponse {
    fn from(pair: TokenPair) -> Self {
        Self::new(pair.access_token, pair.refresh_token, pair.access_expires_in)
    }
}
