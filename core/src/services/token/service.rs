//! Token service: session issuance and the refresh exchange

use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use crate::domain::entities::claims::ClaimSet;
use crate::domain::entities::token::{TokenKind, TokenPair, TokenValidation, VerifiedToken};
use crate::errors::{RejectReason, TokenError};

/// Issues access/refresh token pairs and exchanges refresh tokens.
///
/// Holds no per-token state: validity is decided by signature and expiry
/// alone, so the service is safe to share across threads.
#[derive(Debug)]
pub struct TokenService {
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl TokenService {
    /// Creates a new token service using wall-clock time
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or error if key loading fails
    pub fn new(config: TokenServiceConfig) -> Result<Self, TokenError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let codec = TokenCodec::from_config(&config, clock)?;
        Ok(Self { codec, config })
    }

    /// Creates a token service over an existing codec
    pub fn from_codec(codec: TokenCodec, config: TokenServiceConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Access token lifetime in seconds
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }

    /// Issues an access/refresh pair for an authenticated identity
    ///
    /// Both tokens carry identical identity claims. Repeated calls produce
    /// fresh timestamps.
    ///
    /// # Arguments
    ///
    /// * `identity` - Claim set established by an external authentication step
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue_session(&self, identity: &ClaimSet) -> Result<TokenPair, TokenError> {
        let access_token = self.issue_access_token(identity)?;
        let refresh_token = self.issue_refresh_token(identity)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access_expires_in(),
            self.config.refresh_token_ttl.num_seconds(),
        ))
    }

    /// Exchanges a refresh token for a new session
    ///
    /// The presented token must validate and carry the refresh discriminator;
    /// a genuine access token is rejected. Under rotation a new refresh token
    /// is issued, otherwise the presented one is handed back.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access token plus the refresh token to keep
    /// * `Err(TokenError::InvalidRefreshToken)` - Any validation failure
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let verified = self
            .verify_kind(refresh_token, TokenKind::Refresh)
            .map_err(|reason| {
                tracing::warn!(reason = %reason, "invalid_refresh_token");
                TokenError::InvalidRefreshToken
            })?;

        let access_token = self.issue_access_token(&verified.claims)?;

        let (refresh_token, refresh_expires_in) = if self.config.rotate_refresh_tokens {
            (
                self.issue_refresh_token(&verified.claims)?,
                self.config.refresh_token_ttl.num_seconds(),
            )
        } else {
            (
                refresh_token.to_string(),
                verified.remaining_seconds(self.codec.now()),
            )
        };

        tracing::info!(
            user_id = %verified.claims.user_id,
            rotated = self.config.rotate_refresh_tokens,
            "token_refreshed"
        );

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access_expires_in(),
            refresh_expires_in,
        ))
    }

    /// Verifies a bearer access token
    ///
    /// Refresh tokens are rejected so they cannot be used as API credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - The verified access token
    /// * `Err(TokenError::InvalidToken)` - Any validation failure
    pub fn verify_access_token(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_kind(token, TokenKind::Access).map_err(|reason| {
            tracing::warn!(reason = %reason, "invalid_access_token");
            TokenError::InvalidToken
        })
    }

    /// Validates a token of either kind
    pub fn validate(&self, token: &str) -> TokenValidation {
        self.codec.validate(token)
    }

    fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<VerifiedToken, RejectReason> {
        let verified = self.codec.decode(token)?;
        if verified.kind != expected {
            return Err(RejectReason::WrongKind {
                expected: expected.as_str(),
            });
        }
        Ok(verified)
    }

    fn issue_access_token(&self, identity: &ClaimSet) -> Result<String, TokenError> {
        let token = self
            .codec
            .issue(identity, self.config.access_token_ttl, TokenKind::Access)?;
        tracing::debug!(user_id = %identity.user_id, "access_token_created");
        Ok(token)
    }

    fn issue_refresh_token(&self, identity: &ClaimSet) -> Result<String, TokenError> {
        let token = self
            .codec
            .issue(identity, self.config.refresh_token_ttl, TokenKind::Refresh)?;
        tracing::debug!(user_id = %identity.user_id, "refresh_token_created");
        Ok(token)
    }
}
