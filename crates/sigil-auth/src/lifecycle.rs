//! Token generation, verification and refresh.
//!
//! Each [`TokenConfig`] moves through three states:
//!
//! ```text
//! Unissued --generate--> Issued --regenerate--> Issued ...
//! ```
//!
//! Calling [`TokenConfig::generate`] on an issued configuration regenerates
//! it. Regeneration keeps every claim of the last token and only rotates
//! `exp` and `iat`.
//!
//! Operations that replace the stored token take `&mut self`, so concurrent
//! regeneration of one configuration is ruled out by the borrow checker.
//! Verification only needs `&self`.

use tracing::{debug, warn};

use sigil_core::{TokenError, now_timestamp};

use crate::claims::{ClaimMap, check_time_claims, compose, refresh_time_claims};
use crate::config::TokenConfig;
use crate::signer::ParsedToken;

/// Generates an access and a refresh token together.
///
/// Either both tokens are returned or neither is. If the refresh token
/// cannot be generated, the access configuration's stored token is restored.
///
/// # Errors
///
/// - [`TokenError::TokenConfigNil`] if either configuration is missing
/// - any error from [`TokenConfig::generate`]
pub fn generate_pair(
    access: Option<&mut TokenConfig>,
    refresh: Option<&mut TokenConfig>,
) -> Result<(String, String), TokenError> {
    let (Some(access), Some(refresh)) = (access, refresh) else {
        return Err(TokenError::TokenConfigNil);
    };

    let previous = access.token.clone();
    let access_token = access.generate()?;

    match refresh.generate() {
        Ok(refresh_token) => Ok((access_token, refresh_token)),
        Err(err) => {
            access.token = previous;
            Err(err)
        }
    }
}

impl TokenConfig {
    /// Issues a token, or regenerates it if one was already issued.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::SigningToken`] if the signer fails, or any
    /// error from [`TokenConfig::regenerate`].
    pub fn generate(&mut self) -> Result<String, TokenError> {
        if self.token.is_some() {
            return self.regenerate();
        }

        let claims = compose(&self.standard_claims, &self.custom_claims);
        let signed = self.sign(&claims)?;
        debug!(kind = %self.kind, claims = claims.len(), "Token issued");

        self.token = Some(signed.clone());
        Ok(signed)
    }

    /// Re-signs the last issued token with fresh `exp` and `iat` values.
    ///
    /// The claims are recovered by parsing the stored token, so a token that
    /// has expired or is not yet valid cannot be regenerated.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenNotGenerated`] if nothing has been issued
    /// - [`TokenError::TokenInvalid`] if the stored token no longer verifies
    ///   or its time claims reject it
    /// - [`TokenError::SigningToken`] if the signer fails
    pub fn regenerate(&mut self) -> Result<String, TokenError> {
        let parsed = self.parse()?;

        let claims = refresh_time_claims(parsed.claims, now_timestamp(), self.expiration);
        let signed = self.sign(&claims)?;
        debug!(kind = %self.kind, claims = claims.len(), "Token regenerated");

        self.token = Some(signed.clone());
        Ok(signed)
    }

    /// Issues a new access token if `refresh` holds a currently valid token.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenNotGenerated`] if this configuration has not
    ///   issued a token or `refresh` is missing
    /// - [`TokenError::TokenInvalid`] if the refresh token is invalid or expired
    pub fn refresh_token(&mut self, refresh: Option<&TokenConfig>) -> Result<String, TokenError> {
        let Some(refresh) = refresh.filter(|_| self.is_issued()) else {
            return Err(TokenError::TokenNotGenerated);
        };

        if !refresh.is_valid() {
            warn!(kind = %self.kind, "Refresh rejected: refresh token is not valid");
            return Err(TokenError::TokenInvalid);
        }

        self.regenerate()
    }

    /// Verifies the stored token.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenNotGenerated`] if nothing has been issued
    /// - [`TokenError::TokenInvalid`] for any verification failure
    pub fn parse(&self) -> Result<ParsedToken, TokenError> {
        let token = self.token.as_deref().ok_or(TokenError::TokenNotGenerated)?;
        self.verify(token)
    }

    /// Verifies a token presented by a client against this configuration.
    ///
    /// Signature, algorithm, `exp` and `nbf` are all checked. Every failure
    /// is reported as [`TokenError::TokenInvalid`].
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::TokenInvalid`] if the token does not verify.
    pub fn verify(&self, token: &str) -> Result<ParsedToken, TokenError> {
        self.verify_claims(token).map_err(|_| TokenError::TokenInvalid)
    }

    /// Returns the verified claims of the stored token.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenNotGenerated`] if nothing has been issued
    /// - [`TokenError::TokenInvalid`] for signature or time failures
    /// - [`TokenError::ClaimsInvalid`] if the payload is not a well-typed claim map
    pub fn extract_claims(&self) -> Result<ClaimMap, TokenError> {
        let token = self.token.as_deref().ok_or(TokenError::TokenNotGenerated)?;
        self.verify_claims(token).map(|parsed| parsed.claims)
    }

    /// Whether the stored token verifies and has not expired. Never errors.
    pub fn is_valid(&self) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| self.verify_claims(token).is_ok())
    }

    /// Whether a presented token verifies and has not expired. Never errors.
    pub fn is_valid_token(&self, token: &str) -> bool {
        self.verify_claims(token).is_ok()
    }

    fn verify_claims(&self, token: &str) -> Result<ParsedToken, TokenError> {
        let parsed = self.signer.verify(token, &self.secret.expose())?;
        check_time_claims(&parsed.claims, now_timestamp())?;
        Ok(parsed)
    }

    fn sign(&self, claims: &ClaimMap) -> Result<String, TokenError> {
        self.signer
            .sign(claims, &self.secret.expose())
            .inspect_err(|err| warn!(kind = %self.kind, error = %err, "Token signing failed"))
    }
}
