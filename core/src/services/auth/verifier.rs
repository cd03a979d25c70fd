//! Credential verification seam for the login flow

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::entities::claims::{ClaimSet, ROLE_ADMIN, ROLE_USER};
use crate::errors::{DomainError, ValidationError};

/// Checks a user's credentials and resolves the identity to put in tokens
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies an email/password pair
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ClaimSet))` - Credentials accepted
    /// * `Ok(None)` - Credentials rejected
    /// * `Err(DomainError)` - The backing store could not be consulted
    async fn verify(&self, email: &str, password: &str) -> Result<Option<ClaimSet>, DomainError>;
}

/// Accepts every credential pair.
///
/// Intended for development deployments without a user store. The role is
/// `admin` when the email starts with `admin`, otherwise `user`. The email
/// claim keeps the submitted form; only the user id uses the normalized one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveVerifier;

#[async_trait]
impl CredentialVerifier for PermissiveVerifier {
    async fn verify(&self, email: &str, _password: &str) -> Result<Option<ClaimSet>, DomainError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::InvalidEmail.into());
        }

        let role = if normalized.starts_with(ROLE_ADMIN) {
            ROLE_ADMIN
        } else {
            ROLE_USER
        };

        let claims = ClaimSet::new(derive_user_id(&normalized), email, role)?;
        Ok(Some(claims))
    }
}

/// Stable user id derived from a normalized email
pub fn derive_user_id(email: &str) -> String {
    let digest = Sha256::digest(email.as_bytes());
    format!("user-{}", &hex::encode(digest)[..16])
}
