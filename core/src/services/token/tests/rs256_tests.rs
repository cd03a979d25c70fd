//! Tests for RS256 token signing and verification

use std::path::Path;

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use super::{identity, test_clock};
use crate::domain::entities::token::{TokenKind, TokenValidation};
use crate::services::token::{KeyConfig, SigningKeys, TokenCodec, TokenService, TokenServiceConfig};

const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/jwt_private_key.pem");
const TEST_PUBLIC_KEY: &[u8] = include_bytes!("../../../../tests/fixtures/jwt_public_key.pem");

fn rs256_codec() -> TokenCodec {
    let keys = SigningKeys::rsa_from_pem(Algorithm::RS256, TEST_PRIVATE_KEY, TEST_PUBLIC_KEY).unwrap();
    TokenCodec::new(keys, test_clock())
}

fn fixture_path(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_rs256_round_trip() {
    let codec = rs256_codec();
    let claims = identity().with_tenant("tenant-1");

    let token = codec.issue(&claims, Duration::hours(1), TokenKind::Access).unwrap();
    let verified = codec.validate(&token).into_verified().unwrap();

    assert_eq!(codec.algorithm(), Algorithm::RS256);
    assert_eq!(verified.claims, claims);
    assert_eq!(verified.kind, TokenKind::Access);
}

#[test]
fn test_rs256_header_names_algorithm() {
    let codec = rs256_codec();
    let token = codec.issue(&identity(), Duration::hours(1), TokenKind::Refresh).unwrap();

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);
}

#[test]
fn test_hmac_token_keyed_with_public_key_rejected() {
    let codec = rs256_codec();

    // Classic key confusion: sign HS256 using the public key bytes as secret
    let forged = encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "user_id": "u1",
            "email": "a@example.com",
            "role": "admin",
            "tenant_id": null,
            "exp": 1_700_003_600i64,
            "iat": 1_700_000_000i64
        }),
        &EncodingKey::from_secret(TEST_PUBLIC_KEY),
    )
    .unwrap();

    assert_eq!(codec.validate(&forged), TokenValidation::Invalid);
}

#[test]
fn test_hmac_codec_rejects_rs256_token() {
    let rsa = rs256_codec();
    let hmac = super::hs256_codec(test_clock());

    let token = rsa.issue(&identity(), Duration::hours(1), TokenKind::Access).unwrap();
    assert_eq!(hmac.validate(&token), TokenValidation::Invalid);
}

#[test]
fn test_token_service_from_rsa_files() {
    let config = TokenServiceConfig {
        algorithm: Algorithm::RS256,
        keys: KeyConfig::RsaFiles {
            private_key_path: fixture_path("jwt_private_key.pem"),
            public_key_path: fixture_path("jwt_public_key.pem"),
        },
        ..Default::default()
    };
    let service = TokenService::with_clock(config, test_clock()).unwrap();

    let pair = service.issue_session(&identity()).unwrap();
    let refreshed = service.refresh_session(&pair.refresh_token).unwrap();

    assert_eq!(
        service.verify_access_token(&refreshed.access_token).unwrap().claims,
        identity()
    );
}

#[test]
fn test_missing_key_file_fails_construction() {
    let config = TokenServiceConfig {
        algorithm: Algorithm::RS256,
        keys: KeyConfig::RsaFiles {
            private_key_path: fixture_path("does_not_exist.pem"),
            public_key_path: fixture_path("jwt_public_key.pem"),
        },
        ..Default::default()
    };

    assert!(TokenService::new(config).is_err());
}
