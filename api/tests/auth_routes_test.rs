//! Integration tests for the authentication routes

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};

use common::{send, TestContext, API_PREFIX, SECRET};
use ta_api::create_app;
use ta_core::services::auth::AuthServiceConfig;
use ta_shared::config::CorsConfig;

fn decode_payload(token: &str) -> Value {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    decode::<Value>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
        .unwrap()
        .claims
}

fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("{}/auth/login", API_PREFIX))
        .set_json(json!({ "email": email, "password": password }))
}

fn refresh_request(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("{}/auth/refresh", API_PREFIX))
        .set_json(json!({ "refresh_token": refresh_token }))
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "healthy");
}

#[actix_web::test]
async fn test_login_returns_bearer_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, login_request("a@example.com", "secret").to_request()).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["token_type"], "bearer");
    assert_eq!(resp.body["expires_in"], 1800);

    let access = decode_payload(resp.body["access_token"].as_str().unwrap());
    assert_eq!(access["email"], "a@example.com");
    assert_eq!(access["role"], "user");
    assert!(access["tenant_id"].is_null());
    assert!(access.get("type").is_none());
    assert_eq!(access["iat"], 1_700_000_000i64);
    assert_eq!(access["exp"], 1_700_001_800i64);

    let refresh = decode_payload(resp.body["refresh_token"].as_str().unwrap());
    assert_eq!(refresh["type"], "refresh");
    assert_eq!(refresh["user_id"], access["user_id"]);
}

#[actix_web::test]
async fn test_login_admin_email_gets_admin_role() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, login_request("admin@example.com", "secret").to_request()).await;
    let access = decode_payload(resp.body["access_token"].as_str().unwrap());

    assert_eq!(access["role"], "admin");
}

#[actix_web::test]
async fn test_login_applies_default_tenant() {
    let ctx = TestContext::with_auth_config(AuthServiceConfig::with_default_tenant("tenant-1"));
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, login_request("a@example.com", "secret").to_request()).await;
    let access = decode_payload(resp.body["access_token"].as_str().unwrap());

    assert_eq!(access["tenant_id"], "tenant-1");
}

#[actix_web::test]
async fn test_login_rejects_invalid_email() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, login_request("not-an-email", "secret").to_request()).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "VALIDATION_ERROR");
    assert!(resp.body["details"]["email"].is_array());
}

#[actix_web::test]
async fn test_login_rejects_empty_password() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, login_request("a@example.com", "").to_request()).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["details"]["password"].is_array());
}

#[actix_web::test]
async fn test_login_rejects_malformed_body() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let req = test::TestRequest::post()
        .uri(&format!("{}/auth/login", API_PREFIX))
        .set_json(json!({ "email": "a@example.com" }))
        .to_request();
    let resp = send(&app, req).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_refresh_issues_new_session() {
    let ctx = TestContext::new();
    let clock = ctx.clock.clone();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let login = send(&app, login_request("a@example.com", "secret").to_request()).await;
    let refresh_token = login.body["refresh_token"].as_str().unwrap().to_string();

    clock.advance(Duration::seconds(3601));

    let resp = send(&app, refresh_request(&refresh_token).to_request()).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["token_type"], "bearer");

    let original = decode_payload(&refresh_token);
    let access = decode_payload(resp.body["access_token"].as_str().unwrap());
    assert!(access["iat"].as_i64().unwrap() > original["iat"].as_i64().unwrap());
    assert_ne!(resp.body["refresh_token"], Value::String(refresh_token));
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let login = send(&app, login_request("a@example.com", "secret").to_request()).await;
    let access_token = login.body["access_token"].as_str().unwrap();

    let resp = send(&app, refresh_request(access_token).to_request()).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "TOKEN_INVALID");
    assert_eq!(resp.body["message"], "Invalid or expired refresh token");
}

#[actix_web::test]
async fn test_refresh_rejects_garbage() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    for token in ["short", "definitely.not.a-valid-token"] {
        let resp = send(&app, refresh_request(token).to_request()).await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body["message"], "Invalid or expired refresh token");
    }
}

#[actix_web::test]
async fn test_refresh_rejects_expired_token() {
    let ctx = TestContext::new();
    let clock = ctx.clock.clone();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let login = send(&app, login_request("a@example.com", "secret").to_request()).await;
    let refresh_token = login.body["refresh_token"].as_str().unwrap().to_string();

    clock.advance(Duration::days(8));

    let resp = send(&app, refresh_request(&refresh_token).to_request()).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_route_returns_json_404() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state, ctx.token_service, &CorsConfig::default(), API_PREFIX)).await;

    let resp = send(&app, test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["error"], "NOT_FOUND");
}
