//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// Secret shipped for local development only
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret for HMAC algorithms
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Signing algorithm name (HS256, HS384, HS512, RS256, ...)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,

    /// PEM private key path, RSA algorithms only
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// PEM public key path, RSA algorithms only
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Issue a fresh refresh token on every refresh exchange
    #[serde(default = "default_rotate_refresh_tokens")]
    pub rotate_refresh_tokens: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            algorithm: default_algorithm(),
            access_token_expiry: default_access_token_expiry(),
            refresh_token_expiry: default_refresh_token_expiry(),
            private_key_path: None,
            public_key_path: None,
            rotate_refresh_tokens: default_rotate_refresh_tokens(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Use an RSA key pair loaded from PEM files
    pub fn with_rsa_keys(
        mut self,
        algorithm: impl Into<String>,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.algorithm = algorithm.into();
        self.private_key_path = Some(private_key_path.into());
        self.public_key_path = Some(public_key_path.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Whether the configured algorithm is an HMAC variant
    pub fn is_symmetric(&self) -> bool {
        self.algorithm.to_ascii_uppercase().starts_with("HS")
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Tenant stamped on identities that arrive without one.
    /// `None` issues tokens with a null `tenant_id`.
    #[serde(default)]
    pub default_tenant_id: Option<String>,
}

impl AuthConfig {
    /// Create from the flat environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").ok(),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH").ok(),
            rotate_refresh_tokens: std::env::var("JWT_ROTATE_REFRESH_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rotate_refresh_tokens),
        };

        Self {
            jwt,
            default_tenant_id: std::env::var("DEFAULT_TENANT_ID")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}

fn default_secret() -> String {
    String::from(DEFAULT_JWT_SECRET)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_access_token_expiry() -> i64 {
    1800 // 30 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_rotate_refresh_tokens() -> bool {
    true
}
