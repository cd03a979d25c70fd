//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::{to_bytes, MessageBody},
    dev::{Service, ServiceResponse},
    http::{header::HeaderMap, StatusCode},
    web, Error,
};
use chrono::{TimeZone, Utc};

use ta_api::AppState;
use ta_core::services::auth::{AuthService, AuthServiceConfig, PermissiveVerifier};
use ta_core::services::token::{ManualClock, TokenService, TokenServiceConfig};

pub const SECRET: &str = "integration-test-secret";
pub const API_PREFIX: &str = "/api/v1";

pub struct TestContext {
    pub clock: Arc<ManualClock>,
    pub state: web::Data<AppState<PermissiveVerifier>>,
    pub token_service: web::Data<TokenService>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_auth_config(AuthServiceConfig::default())
    }

    pub fn with_auth_config(config: AuthServiceConfig) -> Self {
        let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
        let token_service = Arc::new(
            TokenService::with_clock(TokenServiceConfig::with_secret(SECRET), clock.clone()).unwrap(),
        );
        let auth_service = Arc::new(AuthService::new(
            Arc::new(PermissiveVerifier),
            token_service.clone(),
            config,
        ));

        Self {
            clock,
            state: web::Data::new(AppState::new(auth_service)),
            token_service: web::Data::from(token_service),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Calls the service, rendering middleware errors the way the server does
pub async fn send<S, R, B>(app: &S, req: R) -> TestResponse
where
    S: Service<R, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
{
    let response = match app.call(req).await {
        Ok(res) => res.map_into_boxed_body().into_parts().1,
        Err(err) => err.error_response(),
    };

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body()).await.unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}
