//! Claim structures and composition.
//!
//! A token payload is a flat [`ClaimMap`]. It is built from two sources:
//!
//! - [`StandardClaims`]: the registered claims (`exp`, `iss`, `aud`, `sub`,
//!   `nbf`, `iat`, `jti`)
//! - custom claims: any caller-defined key/value pairs
//!
//! [`compose`] merges them with standard claims taking precedence, so a
//! custom `exp` can never shadow the configured expiration.

use chrono::TimeDelta;
use serde_json::{Map, Value};
use uuid::Uuid;

use sigil_core::time::timestamp_in;
use sigil_core::{TokenError, now_timestamp};

/// Token payload: claim name to JSON value.
pub type ClaimMap = Map<String, Value>;

pub const EXPIRES_AT: &str = "exp";
pub const ISSUER: &str = "iss";
pub const AUDIENCE: &str = "aud";
pub const SUBJECT: &str = "sub";
pub const NOT_BEFORE: &str = "nbf";
pub const ISSUED_AT: &str = "iat";
pub const TOKEN_ID: &str = "jti";

/// Claim names that standard claims own.
pub const RESERVED_CLAIMS: [&str; 7] = [
    EXPIRES_AT, ISSUER, AUDIENCE, SUBJECT, NOT_BEFORE, ISSUED_AT, TOKEN_ID,
];

/// Registered JWT claims.
///
/// Every field is optional. Zero timestamps and empty strings count as unset
/// and are left out of the composed payload.
///
/// # Fields
///
/// - `exp`: Expiration time (Unix seconds), required by the token builder
/// - `iss`: Issuer
/// - `aud`: Audience
/// - `sub`: Subject
/// - `nbf`: Not-before time (Unix seconds)
/// - `iat`: Issued-at time (Unix seconds)
/// - `jti`: Unique token identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardClaims {
    pub exp: Option<i64>,
    pub iss: Option<String>,
    pub aud: Option<String>,
    pub sub: Option<String>,
    pub nbf: Option<i64>,
    pub iat: Option<i64>,
    pub jti: Option<String>,
}

impl StandardClaims {
    /// Claims expiring at the given Unix timestamp.
    pub fn new(exp: i64) -> Self {
        Self {
            exp: Some(exp),
            ..Self::default()
        }
    }

    /// Claims expiring `lifetime` from now.
    pub fn expires_in(lifetime: TimeDelta) -> Self {
        Self::new(timestamp_in(lifetime))
    }

    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    pub fn not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn issued_now(self) -> Self {
        self.issued_at(now_timestamp())
    }

    pub fn id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Sets `jti` to a fresh UUID v4.
    pub fn random_id(self) -> Self {
        self.id(Uuid::new_v4().to_string())
    }

    /// The expiration timestamp, if set to a non-zero value.
    pub fn expiration(&self) -> Option<i64> {
        self.exp.filter(|exp| *exp != 0)
    }

    /// The populated standard claims as a payload map.
    pub fn to_claims(&self) -> ClaimMap {
        let mut claims = ClaimMap::new();

        let timestamps = [
            (EXPIRES_AT, self.exp),
            (NOT_BEFORE, self.nbf),
            (ISSUED_AT, self.iat),
        ];
        for (key, value) in timestamps {
            if let Some(ts) = value.filter(|ts| *ts != 0) {
                claims.insert(key.to_string(), Value::from(ts));
            }
        }

        let strings = [
            (ISSUER, &self.iss),
            (AUDIENCE, &self.aud),
            (SUBJECT, &self.sub),
            (TOKEN_ID, &self.jti),
        ];
        for (key, value) in strings {
            if let Some(s) = value.as_deref().filter(|s| !s.is_empty()) {
                claims.insert(key.to_string(), Value::from(s));
            }
        }

        claims
    }
}

/// Merges custom claims with standard claims. Standard claims win on collision.
pub fn compose(standard: &StandardClaims, custom: &ClaimMap) -> ClaimMap {
    let mut claims = custom.clone();
    claims.extend(standard.to_claims());
    claims
}

/// Reads a numeric time claim.
///
/// Returns `Ok(None)` when absent and [`TokenError::ClaimsInvalid`] when the
/// value is not a JSON number.
pub fn timestamp_claim(claims: &ClaimMap, key: &str) -> Result<Option<i64>, TokenError> {
    match claims.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .map(Some)
            .ok_or(TokenError::ClaimsInvalid),
        Some(_) => Err(TokenError::ClaimsInvalid),
    }
}

/// Checks `exp` and `nbf` against `now`.
///
/// # Errors
///
/// - [`TokenError::ClaimsInvalid`] if `exp`, `nbf` or `iat` is not a number
/// - [`TokenError::TokenInvalid`] if `exp` is before `now` or `nbf` is after it
pub fn check_time_claims(claims: &ClaimMap, now: i64) -> Result<(), TokenError> {
    let exp = timestamp_claim(claims, EXPIRES_AT)?;
    let nbf = timestamp_claim(claims, NOT_BEFORE)?;
    timestamp_claim(claims, ISSUED_AT)?;

    // An exp equal to now is still valid.
    if exp.is_some_and(|exp| exp < now) {
        return Err(TokenError::TokenInvalid);
    }
    if nbf.is_some_and(|nbf| nbf > now) {
        return Err(TokenError::TokenInvalid);
    }

    Ok(())
}

/// Rewrites the time-based claims of a previously issued payload.
///
/// `exp` becomes `now + lifetime` and `iat` becomes `now`, but only when
/// they were already present. Every other claim is carried over unchanged.
pub fn refresh_time_claims(mut claims: ClaimMap, now: i64, lifetime: TimeDelta) -> ClaimMap {
    if let Some(exp) = claims.get_mut(EXPIRES_AT) {
        *exp = Value::from(now.saturating_add(lifetime.num_seconds()));
    }
    if let Some(iat) = claims.get_mut(ISSUED_AT) {
        *iat = Value::from(now);
    }
    claims
}
