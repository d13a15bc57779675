//! Signing and verification adapters.
//!
//! The [`Signer`] trait is the seam between token lifecycle logic and the
//! signature algorithm. [`JwtSigner`] is the default implementation and
//! delegates the compact JWS format to `jsonwebtoken`.
//!
//! # Supported Algorithms
//!
//! [`JwtSigner`] signs with raw secret bytes, so only the HMAC family is
//! usable:
//!
//! - **HS256**: HMAC with SHA-256 (default)
//! - **HS384**: HMAC with SHA-384
//! - **HS512**: HMAC with SHA-512
//!
//! Any other algorithm can be named, but signing fails with
//! [`TokenError::SigningToken`] because a shared secret is not a valid key
//! for it.

use std::fmt;
use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;

use sigil_core::{SecretView, TokenError};

use crate::claims::ClaimMap;

/// A verified token: its header and its claim payload.
#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub header: Header,
    pub claims: ClaimMap,
}

/// Signs claim payloads and verifies signed tokens.
///
/// Implementations must be stateless with respect to the key: the key is
/// passed in on every call and must not be retained.
pub trait Signer: fmt::Debug + Send + Sync {
    /// The algorithm written to, and required in, token headers.
    fn algorithm(&self) -> Algorithm;

    /// Produces a signed compact token for `claims`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::SigningToken`] if the signature cannot be produced.
    fn sign(&self, claims: &ClaimMap, key: &SecretView<'_>) -> Result<String, TokenError>;

    /// Verifies the signature and algorithm of `token` and decodes its payload.
    ///
    /// Time-based claims are not checked here.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenInvalid`] for malformed input, a bad signature or
    ///   an algorithm other than [`Signer::algorithm`]
    /// - [`TokenError::ClaimsInvalid`] if the payload is not a JSON object
    fn verify(&self, token: &str, key: &SecretView<'_>) -> Result<ParsedToken, TokenError>;
}

/// `jsonwebtoken`-backed signer for the HMAC family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JwtSigner {
    algorithm: Algorithm,
}

impl JwtSigner {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// Resolves a JWS algorithm name such as `"HS256"`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::SigningMethodNil`] if `name` is blank or not a
    /// known algorithm.
    pub fn from_name(name: &str) -> Result<Self, TokenError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TokenError::SigningMethodNil);
        }

        Algorithm::from_str(name)
            .map(Self::new)
            .map_err(|_| TokenError::SigningMethodNil)
    }

    fn uses_shared_secret(&self) -> bool {
        matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        )
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Time claims are checked by the lifecycle layer with zero leeway.
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
    }
}

impl Default for JwtSigner {
    fn default() -> Self {
        Self::new(Algorithm::HS256)
    }
}

impl Signer for JwtSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, claims: &ClaimMap, key: &SecretView<'_>) -> Result<String, TokenError> {
        if !self.uses_shared_secret() {
            return Err(TokenError::signing(format!(
                "unsupported key type for algorithm {:?}",
                self.algorithm
            )));
        }

        encode(
            &Header::new(self.algorithm),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .map_err(TokenError::signing)
    }

    fn verify(&self, token: &str, key: &SecretView<'_>) -> Result<ParsedToken, TokenError> {
        if !self.uses_shared_secret() {
            return Err(TokenError::TokenInvalid);
        }

        let data = decode::<Value>(
            token,
            &DecodingKey::from_secret(key.as_bytes()),
            &self.validation(),
        )
        .map_err(|_| TokenError::TokenInvalid)?;

        match data.claims {
            Value::Object(claims) => Ok(ParsedToken {
                header: data.header,
                claims,
            }),
            _ => Err(TokenError::ClaimsInvalid),
        }
    }
}
