pub mod auth_dto;

pub use auth_dto::{CurrentUserResponse, LoginRequest, RefreshTokenRequest, TokenResponse};
pub use ta_shared::errors::ErrorResponse;
