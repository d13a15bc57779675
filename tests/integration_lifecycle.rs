mod common;

use std::thread;
use std::time::Duration;

use chrono::TimeDelta;
use jsonwebtoken::Algorithm;
use serde_json::json;
use sigil::sigil_auth::claims::compose;
use sigil::sigil_core::now_timestamp;
use sigil::{JwtSigner, StandardClaims, TokenConfig, TokenError};

use common::{SECRET, access_config, claim_map, without_time_claims};

#[test]
fn test_generate_then_parse_for_any_secret() {
    let secrets: [&[u8]; 4] = [
        b"s",
        b"secret",
        b"test-secret-key-at-least-32-characters-long",
        &[0x00, 0xff, 0x10, 0x80],
    ];

    for secret in secrets {
        let mut config = TokenConfig::builder(secret)
            .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
            .build()
            .unwrap();

        config.generate().unwrap();

        let parsed = config.parse().unwrap();
        assert_eq!(parsed.header.alg, Algorithm::HS256);
        assert!(config.is_valid());
    }
}

#[test]
fn test_missing_expiration_never_builds() {
    let result = TokenConfig::builder(SECRET)
        .standard_claims(StandardClaims::default().issuer("test").audience("test"))
        .build();

    assert!(matches!(result, Err(TokenError::InvalidTokenConfig(_))));
}

#[test]
fn test_missing_secret_key() {
    let result = TokenConfig::builder(b"")
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
        .build();

    assert!(matches!(result, Err(TokenError::InvalidSecretKey)));
}

#[test]
fn test_extract_claims_round_trip() {
    let standard = StandardClaims::expires_in(TimeDelta::hours(1))
        .issuer("test issuer")
        .audience("test audience")
        .subject("user-42")
        .not_before(now_timestamp() - 60)
        .issued_now()
        .id("token-1");
    let custom = claim_map(json!({
        "name": "John Doe",
        "admin": true,
        "level": 3,
        "scopes": ["read", "write"],
        "profile": {"locale": "en"},
    }));

    let mut config = TokenConfig::builder(SECRET)
        .standard_claims(standard.clone())
        .custom_claims(custom.clone())
        .build()
        .unwrap();
    config.generate().unwrap();

    assert_eq!(config.extract_claims().unwrap(), compose(&standard, &custom));
}

#[test]
fn test_standard_claims_override_custom() {
    let exp = now_timestamp() + 3600;
    let mut config = TokenConfig::builder(SECRET)
        .standard_claims(StandardClaims::new(exp))
        .custom_claims(claim_map(json!({"exp": 999, "role": "admin"})))
        .build()
        .unwrap();
    config.generate().unwrap();

    let claims = config.extract_claims().unwrap();
    assert_eq!(claims["exp"], json!(exp));
    assert_eq!(claims["role"], json!("admin"));
}

#[test]
fn test_expired_token() {
    let mut config = access_config(TimeDelta::hours(-1));
    config.generate().unwrap();

    assert!(!config.is_valid());
    assert!(matches!(
        config.extract_claims(),
        Err(TokenError::TokenInvalid)
    ));
}

#[test]
fn test_regenerate_preserves_claims() {
    let mut config = access_config(TimeDelta::hours(1));
    let original_exp = config.standard_claims().exp.unwrap();
    config.generate().unwrap();
    let original = config.extract_claims().unwrap();

    thread::sleep(Duration::from_secs(2));

    config.generate().unwrap();
    let expected_exp = now_timestamp() + config.expiration().num_seconds();
    let regenerated = config.extract_claims().unwrap();

    assert_eq!(regenerated["iss"], json!("test"));
    assert_eq!(regenerated["aud"], json!("test"));
    assert_eq!(without_time_claims(regenerated.clone()), without_time_claims(original));

    let new_exp = regenerated["exp"].as_i64().unwrap();
    assert_ne!(new_exp, original_exp);
    assert!((new_exp - expected_exp).abs() <= 1);
}

#[test]
fn test_regenerate_never_introduces_claims() {
    let mut config = TokenConfig::builder(SECRET)
        .custom_claims(claim_map(json!({"role": "admin"})))
        .build()
        .unwrap();
    config.generate().unwrap();

    config.regenerate().unwrap();

    let claims = config.extract_claims().unwrap();
    assert_eq!(claims, claim_map(json!({"role": "admin"})));
}

#[test]
fn test_regenerate_refreshes_issued_at() {
    let issued_at = now_timestamp() - 600;
    let mut config = TokenConfig::builder(SECRET)
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)).issued_at(issued_at))
        .build()
        .unwrap();
    config.generate().unwrap();

    config.regenerate().unwrap();

    let iat = config.extract_claims().unwrap()["iat"].as_i64().unwrap();
    assert!(iat > issued_at);
}

#[test]
fn test_rejects_token_signed_with_other_algorithm() {
    let mut hs384 = TokenConfig::builder(SECRET)
        .signing_method("HS384")
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
        .build()
        .unwrap();
    let token = hs384.generate().unwrap();

    let hs256 = access_config(TimeDelta::hours(1));

    assert!(hs384.is_valid());
    assert!(!hs256.is_valid_token(&token));
    assert!(matches!(hs256.verify(&token), Err(TokenError::TokenInvalid)));
}

#[test]
fn test_rejects_token_from_other_secret() {
    let mut issuer = access_config(TimeDelta::hours(1));
    let token = issuer.generate().unwrap();

    let other = TokenConfig::builder(b"different-secret")
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
        .build()
        .unwrap();

    assert!(matches!(other.verify(&token), Err(TokenError::TokenInvalid)));
}

#[test]
fn test_mistyped_time_claim_is_claims_invalid() {
    let mut config = TokenConfig::builder(SECRET)
        .custom_claims(claim_map(json!({"iat": "yesterday", "role": "admin"})))
        .build()
        .unwrap();
    config.generate().unwrap();

    assert!(matches!(
        config.extract_claims(),
        Err(TokenError::ClaimsInvalid)
    ));
    assert!(matches!(config.parse(), Err(TokenError::TokenInvalid)));
    assert!(!config.is_valid());
}

#[test]
fn test_unsupported_algorithm_fails_signing() {
    let mut config = TokenConfig::builder(SECRET)
        .signing_method("ES256")
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
        .build()
        .unwrap();

    assert!(matches!(config.generate(), Err(TokenError::SigningToken(_))));
    assert!(!config.is_issued());
}

#[test]
fn test_custom_signer() {
    let mut config = TokenConfig::builder(SECRET)
        .signer(JwtSigner::new(Algorithm::HS512))
        .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)))
        .build()
        .unwrap();
    config.generate().unwrap();

    assert_eq!(config.parse().unwrap().header.alg, Algorithm::HS512);
}

#[test]
fn test_dispose_after_issue() {
    let mut config = access_config(TimeDelta::hours(1));
    config.generate().unwrap();
    config.dispose();
}

#[test]
fn test_string_expiration_is_claims_invalid() {
    let mut config = TokenConfig::builder(SECRET)
        .custom_claims(claim_map(json!({"exp": "tomorrow"})))
        .build()
        .unwrap();
    config.generate().unwrap();

    assert!(matches!(
        config.extract_claims(),
        Err(TokenError::ClaimsInvalid)
    ));
    assert!(!config.is_valid());
}
