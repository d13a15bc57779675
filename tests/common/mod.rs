use chrono::TimeDelta;
use serde_json::Value;
use sigil::{ClaimMap, StandardClaims, TokenConfig, TokenKind};

pub const SECRET: &[u8] = b"secret";
pub const REFRESH_SECRET: &[u8] = b"refresh_secret";

#[allow(dead_code)]
/// Turns a `json!` object literal into a claim map.
pub fn claim_map(value: Value) -> ClaimMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Access configuration with `iss`/`aud` set, expiring `lifetime` from now.
pub fn access_config(lifetime: TimeDelta) -> TokenConfig {
    TokenConfig::builder(SECRET)
        .standard_claims(
            StandardClaims::expires_in(lifetime)
                .issuer("test")
                .audience("test"),
        )
        .build()
        .unwrap()
}

/// Refresh configuration with only `exp` set, on its own secret.
pub fn refresh_config(lifetime: TimeDelta) -> TokenConfig {
    TokenConfig::builder(REFRESH_SECRET)
        .standard_claims(StandardClaims::expires_in(lifetime))
        .kind(TokenKind::Refresh)
        .build()
        .unwrap()
}

/// Standard one-hour access / 24-hour refresh pair.
#[allow(dead_code)]
pub fn setup_tokens() -> (TokenConfig, TokenConfig) {
    (
        access_config(TimeDelta::hours(1)),
        refresh_config(TimeDelta::hours(24)),
    )
}

/// Claims with the time-based fields removed.
#[allow(dead_code)]
pub fn without_time_claims(mut claims: ClaimMap) -> ClaimMap {
    claims.remove("exp");
    claims.remove("iat");
    claims
}
