//! Building access/refresh configurations from CLI input.

use anyhow::{Context, Result, bail};
use serde_json::Value;

use sigil_auth::{ClaimMap, StandardClaims, TokenConfig, TokenKind};
use sigil_config::TokenSettings;

/// Parses a `key=value` custom claim.
///
/// The value is read as JSON when possible (`admin=true`, `level=3`) and as a
/// plain string otherwise.
pub fn parse_claim(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("claim '{}' must look like key=value", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("claim '{}' has an empty key", raw);
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// Builds the access and refresh configurations for one session.
///
/// Custom claims only go into the access token. Both tokens carry the
/// subject and a random `jti`.
pub fn build_pair(
    settings: &TokenSettings,
    subject: Option<&str>,
    claims: Vec<(String, Value)>,
) -> Result<(TokenConfig, TokenConfig)> {
    let standard = |base: StandardClaims| match subject {
        Some(sub) => base.subject(sub).issued_now().random_id(),
        None => base.issued_now().random_id(),
    };

    let mut access = TokenConfig::builder_from_settings(
        &settings.access,
        standard(StandardClaims::default()),
    )
    .kind(TokenKind::Access);
    if !claims.is_empty() {
        access = access.custom_claims(claims.into_iter().collect::<ClaimMap>());
    }
    let access = access
        .build()
        .context("failed to build access token configuration")?;

    let refresh =
        TokenConfig::builder_from_settings(&settings.refresh, standard(StandardClaims::default()))
            .kind(TokenKind::Refresh)
            .build()
            .context("failed to build refresh token configuration")?;

    Ok((access, refresh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_claim_json_value() {
        assert_eq!(
            parse_claim("admin=true").unwrap(),
            ("admin".to_string(), json!(true))
        );
        assert_eq!(
            parse_claim("level=3").unwrap(),
            ("level".to_string(), json!(3))
        );
    }

    #[test]
    fn test_parse_claim_plain_string() {
        assert_eq!(
            parse_claim("role=admin").unwrap(),
            ("role".to_string(), json!("admin"))
        );
        assert_eq!(
            parse_claim("note=a=b").unwrap(),
            ("note".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_claim_rejects_bad_input() {
        assert!(parse_claim("role").is_err());
        assert!(parse_claim("=admin").is_err());
    }

    #[test]
    fn test_build_pair_issues_independent_tokens() {
        let settings = TokenSettings::from_lookup(|_| None);
        let (mut access, mut refresh) = build_pair(
            &settings,
            Some("user-1"),
            vec![("role".to_string(), json!("admin"))],
        )
        .unwrap();

        let (access_token, refresh_token) =
            sigil_auth::generate_pair(Some(&mut access), Some(&mut refresh)).unwrap();

        assert_ne!(access_token, refresh_token);
        let access_claims = access.extract_claims().unwrap();
        let refresh_claims = refresh.extract_claims().unwrap();
        assert_eq!(access_claims["sub"], json!("user-1"));
        assert_eq!(access_claims["role"], json!("admin"));
        assert!(!refresh_claims.contains_key("role"));
        assert!(!refresh.is_valid_token(&access_token));
    }

    #[test]
    fn test_build_pair_rejects_huge_expiry() {
        let settings = TokenSettings::from_lookup(|key| {
            (key == "SIGIL_ACCESS_EXPIRY").then(|| "99999999999999999".to_string())
        });

        let err = build_pair(&settings, Some("user-1"), Vec::new()).unwrap_err();

        assert!(err.to_string().contains("access token configuration"));
    }
}
