//! # Sigil
//!
//! Signed bearer tokens with standard and custom claims: issuing,
//! verification and refresh for access/refresh credential pairs.
//!
//! ## Overview
//!
//! - **Claim composition**: Custom claims merged under registered claims,
//!   which always win on collision
//! - **Protected secrets**: Key material exposed only through borrowed views
//!   and wiped on drop
//! - **Token lifecycle**: Generate, verify, regenerate and refresh with
//!   claim identity preserved across regeneration
//! - **Algorithm pinning**: Tokens signed with any algorithm other than the
//!   configured one are rejected
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── sigil-core/           # TokenError, ProtectedSecret, time helpers
//! ├── sigil-config/         # TokenSettings from environment variables
//! ├── sigil-auth/           # Claims, signer, TokenConfig, lifecycle
//! ├── sigil-observability/  # tracing subscriber setup
//! └── sigil-cli/            # Demo binary
//! ```
//!
//! ## Token Lifecycle
//!
//! ```text
//! Unissued --generate--> Issued --regenerate / refresh_token--> Issued
//! ```
//!
//! - **Access Token**: Short-lived token (default: 15 minutes)
//! - **Refresh Token**: Long-lived token (default: 24 hours), only used to
//!   regenerate the access token
//!
//! ## Quick Start
//!
//! ```
//! use chrono::TimeDelta;
//! use sigil::{StandardClaims, TokenConfig, generate_pair};
//!
//! let mut access = TokenConfig::builder(b"access_secret")
//!     .standard_claims(StandardClaims::expires_in(TimeDelta::hours(1)).issuer("test"))
//!     .build()
//!     .unwrap();
//! let mut refresh = TokenConfig::builder(b"refresh_secret")
//!     .standard_claims(StandardClaims::expires_in(TimeDelta::hours(24)))
//!     .build()
//!     .unwrap();
//!
//! let (access_token, _refresh_token) =
//!     generate_pair(Some(&mut access), Some(&mut refresh)).unwrap();
//! assert!(access.is_valid_token(&access_token));
//!
//! let rotated = access.refresh_token(Some(&refresh)).unwrap();
//! assert!(access.is_valid_token(&rotated));
//! ```
//!
//! ### Environment Variables
//!
//! ```bash
//! SIGIL_ACCESS_SECRET=your-access-secret
//! SIGIL_REFRESH_SECRET=your-refresh-secret
//! SIGIL_ACCESS_EXPIRY=900
//! SIGIL_REFRESH_EXPIRY=86400
//! SIGIL_SIGNING_METHOD=HS256
//! ```
//!
//! ## Security Considerations
//!
//! - Secrets and token strings are never logged
//! - Verification failures are reported as a single `TokenInvalid` kind
//! - Expiry uses zero leeway: a token is expired once its `exp` second has passed

// Re-export workspace crates for convenience
pub use sigil_auth;
pub use sigil_config;
pub use sigil_core;
pub use sigil_observability;

pub use sigil_auth::{
    ClaimMap, JwtSigner, ParsedToken, Signer, StandardClaims, TokenConfig, TokenKind,
    generate_pair,
};
pub use sigil_config::TokenSettings;
pub use sigil_core::{ProtectedSecret, TokenError};
