//! Authentication service module
//!
//! Turns verified credentials into token sessions:
//! - Credential verification through a pluggable verifier
//! - Default tenant assignment
//! - Login, refresh and current-user lookup

mod config;
mod service;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use verifier::{derive_user_id, CredentialVerifier, PermissiveVerifier};
