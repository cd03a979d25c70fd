//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it as an access token with the shared [`TokenService`], and
//! injects the caller's identity into the request extensions.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use ta_core::domain::ClaimSet;
use ta_core::services::token::TokenService;

use crate::handlers::error_handler::{unauthorized, MSG_UNAUTHORIZED};

/// Caller identity injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub tenant_id: Option<String>,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == ta_core::domain::ROLE_ADMIN
    }
}

impl From<ClaimSet> for AuthContext {
    fn from(claims: ClaimSet) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
            tenant_id: claims.tenant_id,
        }
    }
}

/// JWT authentication middleware factory.
///
/// Requires `web::Data<TokenService>` in the application data.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = extract_bearer_token(&req).ok_or_else(|| reject("missing_bearer_token"))?;

            let token_service = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
                tracing::error!("token_service_not_configured");
                reject("token_service_not_configured")
            })?;

            let verified = token_service
                .verify_access_token(&token)
                .map_err(|_| reject("access_token_rejected"))?;

            req.extensions_mut().insert(AuthContext::from(verified.claims));

            service.call(req).await
        })
    }
}

fn reject(reason: &'static str) -> Error {
    tracing::debug!(reason, "request_unauthorized");
    InternalError::from_response(reason, unauthorized(MSG_UNAUTHORIZED)).into()
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| reject("auth_context_missing"));

        ready(result)
    }
}
