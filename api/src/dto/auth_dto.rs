use serde::{Deserialize, Serialize};
use validator::Validate;

use ta_core::domain::{AuthResponse, ClaimSet};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 10))]
    pub refresh_token: String,
}

/// Token response for login and refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthResponse> for TokenResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
        }
    }
}

/// Identity behind the presented access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub tenant_id: Option<String>,
}

impl From<ClaimSet> for CurrentUserResponse {
    fn from(claims: ClaimSet) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
            tenant_id: claims.tenant_id,
        }
    }
}
