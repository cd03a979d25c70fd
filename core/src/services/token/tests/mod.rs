//! Tests for the token codec and token service

mod rs256_tests;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jsonwebtoken::Algorithm;

use crate::domain::entities::claims::{ClaimSet, ROLE_USER};
use crate::services::token::{ManualClock, SigningKeys, TokenCodec};

pub(super) const TEST_SECRET: &str = "test-secret-for-unit-tests";

/// Clock pinned to 2023-11-14T22:13:20Z
pub(super) fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
}

pub(super) fn hs256_codec(clock: Arc<ManualClock>) -> TokenCodec {
    let keys = SigningKeys::hmac(Algorithm::HS256, TEST_SECRET.as_bytes()).unwrap();
    TokenCodec::new(keys, clock)
}

pub(super) fn identity() -> ClaimSet {
    ClaimSet::new("u1", "a@example.com", ROLE_USER).unwrap()
}
