//! Token service module for stateless JWT sessions
//!
//! This module handles all token-related operations:
//! - Signing claim sets into access and refresh tokens
//! - Validating untrusted tokens (signature, expiry, required claims)
//! - The refresh exchange with optional refresh-token rotation
//! - HMAC and RSA key loading

mod clock;
mod codec;
mod config;
mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::TokenCodec;
pub use config::{KeyConfig, TokenServiceConfig, MAX_TOKEN_TTL_SECS};
pub use keys::{parse_algorithm, KeySource, SigningKeys};
pub use service::TokenService;
