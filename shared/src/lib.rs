//! Shared configuration and common types for the token session service
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and layered loading
//! - The standard API error response

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
