//! Application state and factory
//!
//! Wires the authentication state, middleware and routes into an
//! Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use ta_core::services::auth::CredentialVerifier;
use ta_core::services::token::TokenService;
use ta_shared::config::CorsConfig;

use crate::handlers::error_handler::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{login::login, me::me, refresh::refresh_token, AppState};
use crate::routes::health::{health_check, not_found};

/// Create and configure the application with all dependencies
///
/// # Arguments
///
/// * `app_state` - Shared authentication state
/// * `token_service` - Token service used by the bearer middleware
/// * `cors` - CORS settings
/// * `api_prefix` - Mount point of the versioned API, e.g. `/api/v1`
pub fn create_app<V>(
    app_state: web::Data<AppState<V>>,
    token_service: web::Data<TokenService>,
    cors: &CorsConfig,
    api_prefix: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    V: CredentialVerifier + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Order matters: CORS runs inside the request span
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(api_prefix).service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<V>))
                    .route("/refresh", web::post().to(refresh_token::<V>))
                    .service(
                        web::resource("/me")
                            .wrap(JwtAuth::new())
                            .route(web::get().to(me)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}
