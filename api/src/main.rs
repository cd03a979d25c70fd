use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ta_api::{create_app, logging::init_logging, AppState};
use ta_core::services::auth::{AuthService, AuthServiceConfig, PermissiveVerifier};
use ta_core::services::token::{TokenService, TokenServiceConfig};
use ta_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // The flat JWT_* variables win when present
    let legacy_env = std::env::var_os("JWT_SECRET").is_some();
    let config = if legacy_env {
        AppConfig::from_env()
    } else {
        AppConfig::load().context("failed to load configuration")?
    };

    init_logging(&config.logging).context("failed to initialize logging")?;

    tracing::info!(
        environment = %config.environment,
        legacy_env,
        algorithm = %config.auth.jwt.algorithm,
        "starting_ta_api"
    );

    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            tracing::error!("default_jwt_secret_in_production");
        } else {
            tracing::warn!("default_jwt_secret_in_use");
        }
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("invalid JWT configuration")?;
    let token_service =
        Arc::new(TokenService::new(token_config).context("failed to load signing keys")?);

    let auth_service = Arc::new(AuthService::new(
        Arc::new(PermissiveVerifier),
        Arc::clone(&token_service),
        AuthServiceConfig::from(&config.auth),
    ));

    let app_state = web::Data::new(AppState::new(auth_service));
    let token_data = web::Data::from(token_service);
    let cors = config.cors.clone();
    let api_prefix = config.server.api_prefix.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "server_binding");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), token_data.clone(), &cors, &api_prefix)
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
