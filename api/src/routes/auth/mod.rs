//! Authentication route handlers
//!
//! - Login with email and password
//! - Token refresh
//! - Current user lookup

pub mod login;
pub mod me;
pub mod refresh;

use std::sync::Arc;

use ta_core::services::auth::{AuthService, CredentialVerifier};

/// Application state that holds shared services
pub struct AppState<V>
where
    V: CredentialVerifier,
{
    pub auth_service: Arc<AuthService<V>>,
}

impl<V> AppState<V>
where
    V: CredentialVerifier,
{
    pub fn new(auth_service: Arc<AuthService<V>>) -> Self {
        Self { auth_service }
    }
}
