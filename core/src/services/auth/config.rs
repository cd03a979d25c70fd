//! Configuration for the authentication service

use ta_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthServiceConfig {
    /// Tenant stamped into sessions whose identity carries none
    pub default_tenant_id: Option<String>,
}

impl AuthServiceConfig {
    pub fn with_default_tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            default_tenant_id: Some(tenant_id.into()),
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            default_tenant_id: config.default_tenant_id.clone(),
        }
    }
}
