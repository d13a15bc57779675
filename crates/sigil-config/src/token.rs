//! Token settings for access and refresh credentials.
//!
//! # Environment Variables
//!
//! - `SIGIL_ACCESS_SECRET`: Access token signing secret
//! - `SIGIL_REFRESH_SECRET`: Refresh token signing secret
//! - `SIGIL_ACCESS_EXPIRY`: Access token lifetime in seconds (default: 900)
//! - `SIGIL_REFRESH_EXPIRY`: Refresh token lifetime in seconds (default: 86400)
//! - `SIGIL_SIGNING_METHOD`: JWS algorithm name (default: "HS256")
//! - `SIGIL_ISSUER`: Optional `iss` claim for both tokens
//! - `SIGIL_AUDIENCE`: Optional `aud` claim for both tokens
//!
//! Numeric values that fail to parse fall back to their defaults.

use std::env;

use tracing::warn;
use zeroize::Zeroizing;

pub const DEFAULT_ACCESS_EXPIRY: i64 = 900; // 15 minutes
pub const DEFAULT_REFRESH_EXPIRY: i64 = 86400; // 24 hours
pub const DEFAULT_SIGNING_METHOD: &str = "HS256";

/// Settings for one kind of token.
///
/// The secret is wiped from memory when the settings are dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenLifetime {
    pub secret: Zeroizing<String>,
    pub expiry_seconds: i64,
    pub signing_method: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl std::fmt::Debug for TokenLifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifetime")
            .field("secret", &"[REDACTED]")
            .field("expiry_seconds", &self.expiry_seconds)
            .field("signing_method", &self.signing_method)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Access and refresh token settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSettings {
    pub access: TokenLifetime,
    pub refresh: TokenLifetime,
}

impl TokenSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_method = lookup("SIGIL_SIGNING_METHOD")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SIGNING_METHOD.to_string());
        let issuer = lookup("SIGIL_ISSUER").filter(|s| !s.is_empty());
        let audience = lookup("SIGIL_AUDIENCE").filter(|s| !s.is_empty());

        Self {
            access: TokenLifetime {
                secret: Zeroizing::new(
                    lookup("SIGIL_ACCESS_SECRET")
                        .unwrap_or_else(|| "access-secret-change-in-production".to_string()),
                ),
                expiry_seconds: parse_expiry(
                    &lookup,
                    "SIGIL_ACCESS_EXPIRY",
                    DEFAULT_ACCESS_EXPIRY,
                ),
                signing_method: signing_method.clone(),
                issuer: issuer.clone(),
                audience: audience.clone(),
            },
            refresh: TokenLifetime {
                secret: Zeroizing::new(
                    lookup("SIGIL_REFRESH_SECRET")
                        .unwrap_or_else(|| "refresh-secret-change-in-production".to_string()),
                ),
                expiry_seconds: parse_expiry(
                    &lookup,
                    "SIGIL_REFRESH_EXPIRY",
                    DEFAULT_REFRESH_EXPIRY,
                ),
                signing_method,
                issuer,
                audience,
            },
        }
    }
}

fn parse_expiry<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "Unparseable expiry, using default");
            default
        }),
        None => default,
    }
}
