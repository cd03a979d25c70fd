//! Configuration for the token codec and token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use ta_shared::config::JwtConfig;

use super::keys::{parse_algorithm, SigningKeys};
use crate::errors::TokenError;

/// Longest accepted token lifetime, ten years
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Where signing keys are loaded from
#[derive(Clone, PartialEq, Eq)]
pub enum KeyConfig {
    /// HMAC shared secret
    Secret(String),
    /// RSA PEM files
    RsaFiles {
        private_key_path: String,
        public_key_path: String,
    },
}

impl std::fmt::Debug for KeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyConfig::Secret(_) => f.write_str("Secret(<redacted>)"),
            KeyConfig::RsaFiles {
                private_key_path,
                public_key_path,
            } => f
                .debug_struct("RsaFiles")
                .field("private_key_path", private_key_path)
                .field("public_key_path", public_key_path)
                .finish(),
        }
    }
}

/// Configuration for the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Key material matching `algorithm`
    pub keys: KeyConfig,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Issue a new refresh token on every refresh exchange
    pub rotate_refresh_tokens: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            keys: KeyConfig::Secret(ta_shared::config::DEFAULT_JWT_SECRET.to_string()),
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
            rotate_refresh_tokens: true,
        }
    }
}

impl TokenServiceConfig {
    /// HMAC configuration with default lifetimes
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            keys: KeyConfig::Secret(secret.into()),
            ..Default::default()
        }
    }

    /// Converts the deployment-level JWT configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Typed configuration
    /// * `Err(TokenError)` - Unknown algorithm, a lifetime outside
    ///   `1..=MAX_TOKEN_TTL_SECS`, or an RSA algorithm without key paths
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, TokenError> {
        let algorithm = parse_algorithm(&jwt.algorithm)?;

        let keys = if jwt.is_symmetric() {
            KeyConfig::Secret(jwt.secret.clone())
        } else {
            match (&jwt.private_key_path, &jwt.public_key_path) {
                (Some(private_key_path), Some(public_key_path)) => KeyConfig::RsaFiles {
                    private_key_path: private_key_path.clone(),
                    public_key_path: public_key_path.clone(),
                },
                _ => {
                    return Err(TokenError::KeyLoadError {
                        message: format!("{} requires private and public key paths", jwt.algorithm),
                    })
                }
            }
        };

        Ok(Self {
            algorithm,
            keys,
            access_token_ttl: token_ttl(jwt.access_token_expiry, "access")?,
            refresh_token_ttl: token_ttl(jwt.refresh_token_expiry, "refresh")?,
            rotate_refresh_tokens: jwt.rotate_refresh_tokens,
        })
    }

    /// Loads the signing keys described by this configuration
    pub fn load_keys(&self) -> Result<SigningKeys, TokenError> {
        match &self.keys {
            KeyConfig::Secret(secret) => SigningKeys::hmac(self.algorithm, secret.as_bytes()),
            KeyConfig::RsaFiles {
                private_key_path,
                public_key_path,
            } => SigningKeys::rsa_from_files(self.algorithm, private_key_path, public_key_path),
        }
    }
}

fn token_ttl(secs: i64, kind: &str) -> Result<Duration, TokenError> {
    if !(1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
        return Err(TokenError::KeyLoadError {
            message: format!(
                "{} token lifetime must be between 1 and {} seconds, got {}",
                kind, MAX_TOKEN_TTL_SECS, secs
            ),
        });
    }

    Duration::try_seconds(secs).ok_or_else(|| TokenError::KeyLoadError {
        message: format!("{} token lifetime out of range", kind),
    })
}
