//! Identity claims carried inside every token.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Role for regular accounts
pub const ROLE_USER: &str = "user";

/// Role for administrative accounts
pub const ROLE_ADMIN: &str = "admin";

/// The identity attributes carried inside a token payload.
///
/// `user_id`, `email` and `role` are required and non-empty. `tenant_id` is
/// absent for single-tenant deployments; an empty string is a distinct,
/// present tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimSet {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub tenant_id: Option<String>,
}

impl ClaimSet {
    /// Creates a claim set, rejecting empty required fields
    ///
    /// # Arguments
    ///
    /// * `user_id` - Stable user identifier
    /// * `email` - User email address
    /// * `role` - User role (`user`, `admin`, ...)
    ///
    /// # Returns
    ///
    /// * `Ok(ClaimSet)` - The claim set without a tenant
    /// * `Err(ValidationError)` - A required field is empty
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let claims = Self {
            user_id: user_id.into(),
            email: email.into(),
            role: role.into(),
            tenant_id: None,
        };
        claims.validate()?;
        Ok(claims)
    }

    /// Sets the tenant
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Checks that every required field is present
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("user_id", &self.user_id),
            ("email", &self.email),
            ("role", &self.role),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
