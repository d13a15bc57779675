//! # Sigil Auth
//!
//! Signed bearer token configuration, issuing, verification and refresh.
//!
//! This crate provides:
//!
//! - [`claims`]: Standard/custom claim structures and their composition
//! - [`signer`]: The [`Signer`] seam and the `jsonwebtoken`-backed [`JwtSigner`]
//! - [`config`]: [`TokenConfig`] and its step-wise builder
//! - [`lifecycle`]: Generation, regeneration, verification and refresh
//!
//! # Token Types
//!
//! Access and refresh tokens are both plain [`TokenConfig`] values, usually
//! with independent secrets and lifetimes:
//!
//! - **Access Token**: Short-lived token for API authentication
//! - **Refresh Token**: Long-lived token used only to obtain new access tokens
//!
//! # Example
//!
//! ```ignore
//! use chrono::TimeDelta;
//! use sigil_auth::{StandardClaims, TokenConfig, generate_pair};
//!
//! let mut access = TokenConfig::builder(b"access_secret")
//!     .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)).issuer("test"))
//!     .build()?;
//! let mut refresh = TokenConfig::builder(b"refresh_secret")
//!     .standard_claims(StandardClaims::expires_in(TimeDelta::hours(24)))
//!     .build()?;
//!
//! let (access_token, refresh_token) = generate_pair(Some(&mut access), Some(&mut refresh))?;
//!
//! // Later: rotate the access token while the refresh token is still valid
//! let new_access_token = access.refresh_token(Some(&refresh))?;
//! ```

pub mod claims;
pub mod config;
pub mod lifecycle;
pub mod signer;

// Re-export commonly used types at crate root
pub use claims::{ClaimMap, RESERVED_CLAIMS, StandardClaims, compose};
pub use config::{TokenConfig, TokenConfigBuilder, TokenKind};
pub use lifecycle::generate_pair;
pub use signer::{JwtSigner, ParsedToken, Signer};

pub use jsonwebtoken::Algorithm;
