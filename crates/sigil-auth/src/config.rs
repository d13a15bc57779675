//! Token configuration and its builder.
//!
//! A [`TokenConfig`] binds a [`ProtectedSecret`], a [`Signer`] and a claim set.
//! Access and refresh tokens are two instances of the same type; the
//! [`TokenKind`] label only feeds log context.
//!
//! Configurations are assembled with [`TokenConfigBuilder`]. Each builder step
//! validates its input. The first failing step is remembered and every later
//! step is skipped, so [`TokenConfigBuilder::build`] reports exactly one error.
//!
//! # Example
//!
//! ```ignore
//! use chrono::TimeDelta;
//! use sigil_auth::{StandardClaims, TokenConfig, TokenKind};
//!
//! let mut access = TokenConfig::builder(b"access_secret")
//!     .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)).issuer("test"))
//!     .custom_claims(custom)
//!     .build()?;
//!
//! let token = access.generate()?;
//! ```

use std::fmt;

use chrono::TimeDelta;

use sigil_config::TokenLifetime;
use sigil_core::{ProtectedSecret, TokenError, now_timestamp};

use crate::claims::{ClaimMap, StandardClaims};
use crate::signer::{JwtSigner, Signer};

/// Which credential a configuration produces. Used for log context only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenKind {
    #[default]
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => f.write_str("access"),
            Self::Refresh => f.write_str("refresh"),
        }
    }
}

/// Everything needed to issue, verify and regenerate one kind of token.
pub struct TokenConfig {
    pub(crate) secret: ProtectedSecret,
    pub(crate) signer: Box<dyn Signer>,
    pub(crate) standard_claims: StandardClaims,
    pub(crate) custom_claims: ClaimMap,
    pub(crate) token: Option<String>,
    pub(crate) expiration: TimeDelta,
    pub(crate) kind: TokenKind,
}

impl TokenConfig {
    /// Starts a configuration signed with `secret`.
    pub fn builder(secret: impl AsRef<[u8]>) -> TokenConfigBuilder {
        TokenConfigBuilder::new(secret)
    }

    /// Starts a configuration from env-loaded settings.
    ///
    /// The settings supply the secret and signing method. They also fill
    /// `exp` (now + lifetime), plus `iss` and `aud` when configured, on top of
    /// `claims`. A lifetime that overflows the clock fails the builder with
    /// [`TokenError::ExpirationOutOfRange`].
    pub fn builder_from_settings(
        settings: &TokenLifetime,
        mut claims: StandardClaims,
    ) -> TokenConfigBuilder {
        if let Some(iss) = &settings.issuer {
            claims.iss = Some(iss.clone());
        }
        if let Some(aud) = &settings.audience {
            claims.aud = Some(aud.clone());
        }

        let builder = TokenConfigBuilder::new(settings.secret.as_bytes())
            .signing_method(&settings.signing_method);
        match now_timestamp().checked_add(settings.expiry_seconds) {
            Some(exp) => builder.standard_claims(StandardClaims {
                exp: Some(exp),
                ..claims
            }),
            None => builder.step(|_| Err(TokenError::ExpirationOutOfRange)),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn standard_claims(&self) -> &StandardClaims {
        &self.standard_claims
    }

    pub fn custom_claims(&self) -> &ClaimMap {
        &self.custom_claims
    }

    /// Lifetime applied to `exp` when the token is regenerated.
    pub fn expiration(&self) -> TimeDelta {
        self.expiration
    }

    /// The most recently issued token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_issued(&self) -> bool {
        self.token.is_some()
    }

    /// Wipes the secret and releases the configuration.
    pub fn dispose(self) {
        self.secret.dispose();
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("kind", &self.kind)
            .field("secret", &self.secret)
            .field("signer", &self.signer)
            .field("standard_claims", &self.standard_claims)
            .field("custom_claims", &self.custom_claims.len())
            .field("issued", &self.token.is_some())
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Step-wise builder for [`TokenConfig`].
pub struct TokenConfigBuilder {
    secret: Result<ProtectedSecret, TokenError>,
    signer: Box<dyn Signer>,
    standard_claims: StandardClaims,
    custom_claims: ClaimMap,
    expiration: TimeDelta,
    kind: TokenKind,
    error: Option<TokenError>,
}

impl TokenConfigBuilder {
    fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: ProtectedSecret::wrap(secret),
            signer: Box::new(JwtSigner::default()),
            standard_claims: StandardClaims::default(),
            custom_claims: ClaimMap::new(),
            expiration: TimeDelta::zero(),
            kind: TokenKind::default(),
            error: None,
        }
    }

    fn step<F>(mut self, apply: F) -> Self
    where
        F: FnOnce(&mut Self) -> Result<(), TokenError>,
    {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = apply(&mut self) {
            self.error = Some(err);
        }
        self
    }

    /// Sets the registered claims. `exp` is required.
    ///
    /// The lifetime used for regeneration is derived here as `exp - now`. An
    /// `exp` too far from now to express as a [`TimeDelta`] fails with
    /// [`TokenError::ExpirationOutOfRange`].
    pub fn standard_claims(self, claims: StandardClaims) -> Self {
        self.step(|builder| {
            let exp = claims.expiration().ok_or(TokenError::StandardClaimMissing)?;
            builder.expiration = exp
                .checked_sub(now_timestamp())
                .and_then(TimeDelta::try_seconds)
                .ok_or(TokenError::ExpirationOutOfRange)?;
            builder.standard_claims = claims;
            Ok(())
        })
    }

    /// Sets caller-defined claims. The map must not be empty.
    pub fn custom_claims(self, claims: ClaimMap) -> Self {
        self.step(|builder| {
            if claims.is_empty() {
                return Err(TokenError::CustomClaimsMissing);
            }
            builder.custom_claims = claims;
            Ok(())
        })
    }

    /// Selects a [`JwtSigner`] by algorithm name. Defaults to HS256.
    pub fn signing_method(self, name: &str) -> Self {
        self.step(|builder| {
            builder.signer = Box::new(JwtSigner::from_name(name)?);
            Ok(())
        })
    }

    /// Installs a custom signer.
    pub fn signer(self, signer: impl Signer + 'static) -> Self {
        self.step(|builder| {
            builder.signer = Box::new(signer);
            Ok(())
        })
    }

    pub fn kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }

    /// Finishes the configuration.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSecretKey`] if the secret was empty
    /// - [`TokenError::InvalidTokenConfig`] wrapping the first failed step
    pub fn build(self) -> Result<TokenConfig, TokenError> {
        let secret = self.secret?;
        if let Some(err) = self.error {
            return Err(TokenError::invalid_config(err));
        }

        Ok(TokenConfig {
            secret,
            signer: self.signer,
            standard_claims: self.standard_claims,
            custom_claims: self.custom_claims,
            token: None,
            expiration: self.expiration,
            kind: self.kind,
        })
    }
}
