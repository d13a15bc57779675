//! Error taxonomy for token configuration, issuing and verification.
//!
//! Every fallible sigil operation returns a [`TokenError`]. Verification
//! failures are deliberately coarse: a malformed token, a bad signature, an
//! algorithm mismatch and an elapsed expiry all surface as
//! [`TokenError::TokenInvalid`] so callers cannot be used as an oracle.

/// Errors returned while configuring, issuing, verifying or refreshing tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The secret key was empty.
    #[error("invalid secret key")]
    InvalidSecretKey,

    /// A configuration step failed. The source holds the step's own error.
    #[error("invalid token configuration: {0}")]
    InvalidTokenConfig(#[source] Box<TokenError>),

    /// Standard claims were supplied without an expiration time.
    #[error("standard claim 'exp' is required")]
    StandardClaimMissing,

    /// The expiration cannot be represented as a lifetime from now.
    #[error("standard claim 'exp' is out of range")]
    ExpirationOutOfRange,

    /// An empty custom claims map was supplied.
    #[error("custom claims are required")]
    CustomClaimsMissing,

    /// The signing method was unset or named no known algorithm.
    #[error("signing method cannot be nil")]
    SigningMethodNil,

    /// A pair operation was given a missing configuration.
    #[error("token configuration cannot be nil")]
    TokenConfigNil,

    /// The operation needs a token that has not been issued yet.
    #[error("token not generated")]
    TokenNotGenerated,

    /// The token failed parsing, signature verification or time validation.
    #[error("invalid token")]
    TokenInvalid,

    /// The token payload is not a well-typed claim map.
    #[error("invalid claims in token")]
    ClaimsInvalid,

    /// The signer could not produce a signature.
    #[error("error signing token: {0}")]
    SigningToken(String),
}

impl TokenError {
    /// Wraps a builder step failure as [`TokenError::InvalidTokenConfig`].
    #[must_use]
    pub fn invalid_config(source: TokenError) -> Self {
        Self::InvalidTokenConfig(Box::new(source))
    }

    /// Creates a [`TokenError::SigningToken`] from any displayable cause.
    #[must_use]
    pub fn signing(message: impl std::fmt::Display) -> Self {
        Self::SigningToken(message.to_string())
    }

    /// Returns the underlying step error for [`TokenError::InvalidTokenConfig`].
    pub fn config_cause(&self) -> Option<&TokenError> {
        match self {
            Self::InvalidTokenConfig(source) => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_config_keeps_source() {
        let err = TokenError::invalid_config(TokenError::StandardClaimMissing);
        assert!(matches!(
            err.config_cause(),
            Some(TokenError::StandardClaimMissing)
        ));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid token configuration: standard claim 'exp' is required"
        );
    }

    #[test]
    fn test_out_of_range_expiration_message() {
        let err = TokenError::invalid_config(TokenError::ExpirationOutOfRange);
        assert_eq!(
            err.to_string(),
            "invalid token configuration: standard claim 'exp' is out of range"
        );
    }

    #[test]
    fn test_config_cause_none_for_other_variants() {
        assert!(TokenError::TokenInvalid.config_cause().is_none());
    }

    #[test]
    fn test_signing_message() {
        let err = TokenError::signing("unsupported key type for algorithm RS256");
        assert_eq!(
            err.to_string(),
            "error signing token: unsupported key type for algorithm RS256"
        );
    }

    #[test]
    fn test_token_invalid_is_opaque() {
        assert_eq!(TokenError::TokenInvalid.to_string(), "invalid token");
    }
}
