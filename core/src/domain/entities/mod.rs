//! Domain entities representing core business objects.

pub mod claims;
pub mod token;

// Re-export commonly used types
pub use claims::{ClaimSet, ROLE_ADMIN, ROLE_USER};
pub use token::{
    Claims, TokenKind, TokenPair, TokenValidation, VerifiedToken, BEARER_TOKEN_TYPE,
    REFRESH_TOKEN_TYPE,
};
