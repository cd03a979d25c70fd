//! Token codec: signs claim sets into JWTs and validates untrusted JWTs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::keys::SigningKeys;
use crate::domain::entities::claims::ClaimSet;
use crate::domain::entities::token::{Claims, TokenKind, TokenValidation, VerifiedToken};
use crate::errors::{RejectReason, TokenError};

/// Encodes claim sets into signed, time-bounded tokens and decodes them back.
///
/// Stateless: every call depends only on the immutable keys and the clock.
pub struct TokenCodec {
    keys: SigningKeys,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").field("keys", &self.keys).finish()
    }
}

impl TokenCodec {
    /// Creates a codec over the given keys and clock
    pub fn new(keys: SigningKeys, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(keys.algorithm());
        // Expiry is checked against the injected clock once the signature holds.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            keys,
            validation,
            clock,
        }
    }

    /// Creates a codec driven by wall-clock time
    pub fn with_system_clock(keys: SigningKeys) -> Self {
        Self::new(keys, Arc::new(SystemClock))
    }

    /// Loads keys from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Codec ready for use
    /// * `Err(TokenError)` - Keys could not be loaded
    pub fn from_config(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        Ok(Self::new(config.load_keys()?, clock))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.keys.algorithm()
    }

    /// Current instant according to the codec's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issues a signed token for a claim set
    ///
    /// Stamps `iat = now` and `exp = now + ttl`. A zero or negative `ttl`
    /// yields a token that is already expired.
    ///
    /// # Arguments
    ///
    /// * `claims` - Identity claims; callers validate them beforehand
    /// * `ttl` - Token lifetime
    /// * `kind` - Refresh tokens carry `type = "refresh"`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact JWS string
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed, or `exp`
    ///   is out of range
    pub fn issue(&self, claims: &ClaimSet, ttl: Duration, kind: TokenKind) -> Result<String, TokenError> {
        let payload = Claims::new(claims, kind, self.clock.now(), ttl).ok_or_else(|| {
            tracing::error!(ttl_secs = ttl.num_seconds(), kind = %kind, "token_expiry_overflow");
            TokenError::TokenGenerationFailed
        })?;
        let header = Header::new(self.keys.algorithm());

        encode(&header, &payload, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(error = %e, kind = %kind, "token_signing_failed");
            TokenError::TokenGenerationFailed
        })
    }

    /// Validates an untrusted token string.
    ///
    /// Every failure is reported as [`TokenValidation::Invalid`]; the cause
    /// is logged and never returned.
    pub fn validate(&self, token: &str) -> TokenValidation {
        match self.decode(token) {
            Ok(verified) => {
                tracing::debug!(user_id = %verified.claims.user_id, kind = %verified.kind, "token_verified");
                TokenValidation::Valid(verified)
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "token_verification_failed");
                TokenValidation::Invalid
            }
        }
    }

    /// Verifies signature, expiry and claim completeness, in that order
    pub(crate) fn decode(&self, token: &str) -> Result<VerifiedToken, RejectReason> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(RejectReason::Expired);
        }

        data.claims.into_verified()
    }
}
