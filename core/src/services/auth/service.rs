//! Authentication service: login, refresh and current-user lookup

use std::sync::Arc;

use super::config::AuthServiceConfig;
use super::verifier::CredentialVerifier;
use crate::domain::entities::claims::ClaimSet;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError};
use crate::services::token::TokenService;

/// Coordinates credential verification, tenant policy and token issuance
pub struct AuthService<V>
where
    V: CredentialVerifier,
{
    /// Resolves credentials into an identity
    verifier: Arc<V>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<V> AuthService<V>
where
    V: CredentialVerifier,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `verifier` - Credential verifier
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(verifier: Arc<V>, token_service: Arc<TokenService>, config: AuthServiceConfig) -> Self {
        Self {
            verifier,
            token_service,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Authenticates a user and opens a session
    ///
    /// # Arguments
    ///
    /// * `email` - User email
    /// * `password` - User password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Access and refresh tokens
    /// * `Err(DomainError)` - Credentials rejected, verifier failure or
    ///   signing failure
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, DomainError> {
        let identity = self
            .verifier
            .verify(email, password)
            .await?
            .ok_or_else(|| {
                tracing::warn!("login_rejected");
                DomainError::Auth(AuthError::InvalidCredentials)
            })?;

        let identity = self.apply_tenant_policy(identity);
        let pair = self.token_service.issue_session(&identity)?;

        tracing::info!(
            user_id = %identity.user_id,
            role = %identity.role,
            "login_succeeded"
        );

        Ok(pair.into())
    }

    /// Exchanges a refresh token for a new session
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New access token and the refresh token to keep
    /// * `Err(DomainError::Token(InvalidRefreshToken))` - Token rejected
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, DomainError> {
        let pair = self.token_service.refresh_session(refresh_token)?;
        Ok(pair.into())
    }

    /// Resolves the identity behind a bearer access token
    pub fn current_user(&self, access_token: &str) -> Result<ClaimSet, DomainError> {
        let verified = self.token_service.verify_access_token(access_token)?;
        Ok(verified.claims)
    }

    fn apply_tenant_policy(&self, identity: ClaimSet) -> ClaimSet {
        match (&identity.tenant_id, &self.config.default_tenant_id) {
            (None, Some(default)) => identity.with_tenant(default.clone()),
            _ => identity,
        }
    }
}
