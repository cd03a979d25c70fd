//! HTTP surface for the token session service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::auth::AppState;
