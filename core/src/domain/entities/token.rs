//! Token entities for JWT-based session handling.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::claims::ClaimSet;
use crate::errors::RejectReason;

/// Discriminator value marking refresh tokens
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Token type reported to clients alongside issued tokens
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Kind of token, carried in the `type` payload field.
///
/// Access tokens are issued without the field; a decoded `"access"` value is
/// accepted as an access token as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => REFRESH_TOKEN_TYPE,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the JWT payload.
///
/// Identity fields are optional here so that a signed payload missing one of
/// them decodes and is then rejected by [`Claims::into_verified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    /// Serialized as `null` when absent
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,

    /// Issued at timestamp (epoch seconds); optional on foreign tokens
    #[serde(default)]
    pub iat: Option<i64>,

    /// `"refresh"` on refresh tokens, omitted on access tokens
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenKind>,
}

impl Claims {
    /// Builds the payload for a claim set issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `claims` - Identity claims
    /// * `kind` - Token kind; only refresh tokens carry a discriminator
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime added to `issued_at` to form `exp`
    ///
    /// Returns `None` when `issued_at + ttl` is past the representable range.
    pub fn new(
        claims: &ClaimSet,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;

        let token_type = match kind {
            TokenKind::Access => None,
            TokenKind::Refresh => Some(TokenKind::Refresh),
        };

        Some(Self {
            user_id: Some(claims.user_id.clone()),
            email: Some(claims.email.clone()),
            role: Some(claims.role.clone()),
            tenant_id: claims.tenant_id.clone(),
            exp: expires_at.timestamp(),
            iat: Some(issued_at.timestamp()),
            token_type,
        })
    }

    /// Token kind implied by the discriminator
    pub fn kind(&self) -> TokenKind {
        self.token_type.unwrap_or(TokenKind::Access)
    }

    /// Checks the expiry against `now`; valid only while `exp > now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Converts a signature-checked payload into a verified token
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - All required claims are present
    /// * `Err(RejectReason)` - A required claim is missing or null, `user_id`
    ///   is empty, or a timestamp is out of range
    pub fn into_verified(self) -> Result<VerifiedToken, RejectReason> {
        let kind = self.kind();
        let user_id = required_claim(self.user_id, "user_id")?;
        if user_id.trim().is_empty() {
            return Err(RejectReason::MissingClaim { claim: "user_id" });
        }
        let email = required_claim(self.email, "email")?;
        let role = required_claim(self.role, "role")?;

        let issued_at = self.iat.map(|iat| timestamp(iat, "iat")).transpose()?;
        let expires_at = timestamp(self.exp, "exp")?;

        Ok(VerifiedToken {
            claims: ClaimSet {
                user_id,
                email,
                role,
                tenant_id: self.tenant_id,
            },
            kind,
            issued_at,
            expires_at,
        })
    }
}

fn required_claim(value: Option<String>, claim: &'static str) -> Result<String, RejectReason> {
    value.ok_or(RejectReason::MissingClaim { claim })
}

fn timestamp(secs: i64, claim: &str) -> Result<DateTime<Utc>, RejectReason> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| RejectReason::Malformed {
            message: format!("{} out of range", claim),
        })
}

/// A token whose signature, expiry and required claims have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub claims: ClaimSet,
    pub kind: TokenKind,
    /// `None` for foreign tokens issued without `iat`
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    pub fn is_refresh(&self) -> bool {
        self.kind == TokenKind::Refresh
    }

    /// Whole seconds left before expiry, zero once expired
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Outcome of validating an untrusted token string.
///
/// An invalid token is an ordinary result, not an error. The cause is
/// deliberately not carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid(VerifiedToken),
    Invalid,
}

impl TokenValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid(_))
    }

    /// Claims of a valid token
    pub fn claims(&self) -> Option<&ClaimSet> {
        match self {
            TokenValidation::Valid(token) => Some(&token.claims),
            TokenValidation::Invalid => None,
        }
    }

    pub fn into_verified(self) -> Option<VerifiedToken> {
        match self {
            TokenValidation::Valid(token) => Some(token),
            TokenValidation::Invalid => None,
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::claims::ROLE_USER;

    fn identity() -> ClaimSet {
        ClaimSet::new("u1", "a@example.com", ROLE_USER).unwrap()
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_access_claims_have_no_discriminator() {
        let claims = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::hours(1)).unwrap();

        assert_eq!(claims.iat, Some(1_700_000_000));
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(claims.kind(), TokenKind::Access);

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("type").is_none());
        assert!(json["tenant_id"].is_null());
        assert_eq!(json["user_id"], "u1");
    }

    #[test]
    fn test_refresh_claims_carry_discriminator() {
        let claims = Claims::new(&identity(), TokenKind::Refresh, issued_at(), Duration::days(7)).unwrap();

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert_eq!(claims.kind(), TokenKind::Refresh);
    }

    #[test]
    fn test_explicit_access_discriminator_is_accepted() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "user_id": "u1",
            "email": "a@example.com",
            "role": "user",
            "exp": 10,
            "iat": 5,
            "type": "access"
        }))
        .unwrap();

        assert_eq!(claims.kind(), TokenKind::Access);
        assert_eq!(claims.tenant_id, None);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::seconds(10)).unwrap();

        assert!(!claims.is_expired_at(issued_at() + Duration::seconds(9)));
        assert!(claims.is_expired_at(issued_at() + Duration::seconds(10)));
    }

    #[test]
    fn test_into_verified_requires_role() {
        let mut claims = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::hours(1)).unwrap();
        claims.role = None;

        assert_eq!(
            claims.into_verified().unwrap_err(),
            RejectReason::MissingClaim { claim: "role" }
        );
    }

    #[test]
    fn test_into_verified_round_trips_identity() {
        let identity = identity().with_tenant("tenant-1");
        let verified = Claims::new(&identity, TokenKind::Refresh, issued_at(), Duration::hours(1))
            .unwrap()
            .into_verified()
            .unwrap();

        assert_eq!(verified.claims, identity);
        assert!(verified.is_refresh());
        assert_eq!(verified.issued_at, Some(issued_at()));
        assert_eq!(verified.remaining_seconds(issued_at()), 3600);
    }

    #[test]
    fn test_token_validation_accessors() {
        let verified = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::hours(1))
            .unwrap()
            .into_verified()
            .unwrap();

        let valid = TokenValidation::Valid(verified.clone());
        assert!(valid.is_valid());
        assert_eq!(valid.claims(), Some(&verified.claims));
        assert_eq!(valid.into_verified(), Some(verified));

        assert!(!TokenValidation::Invalid.is_valid());
        assert_eq!(TokenValidation::Invalid.claims(), None);
    }

    #[test]
    fn test_expiry_overflow_yields_none() {
        let ttl = Duration::days(100_000_000);

        assert!(Claims::new(&identity(), TokenKind::Access, issued_at(), ttl).is_none());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let mut claims = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::hours(1)).unwrap();
        claims.user_id = Some("  ".to_string());

        assert_eq!(
            claims.into_verified().unwrap_err(),
            RejectReason::MissingClaim { claim: "user_id" }
        );
    }

    #[test]
    fn test_empty_email_and_role_are_present() {
        let mut claims = Claims::new(&identity(), TokenKind::Access, issued_at(), Duration::hours(1)).unwrap();
        claims.email = Some(String::new());
        claims.role = Some(String::new());

        let verified = claims.into_verified().unwrap();
        assert_eq!(verified.claims.email, "");
        assert_eq!(verified.claims.role, "");
    }

    #[test]
    fn test_missing_iat_decodes() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "user_id": "u1",
            "email": "a@example.com",
            "role": "user",
            "exp": 10
        }))
        .unwrap();

        assert_eq!(claims.iat, None);
        assert_eq!(claims.into_verified().unwrap().issued_at, None);
    }
}
