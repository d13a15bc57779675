//! # Sigil Core
//!
//! Core types shared by every sigil crate.
//!
//! This crate provides:
//!
//! - [`errors`]: The [`TokenError`] taxonomy returned by every fallible operation
//! - [`secret`]: [`ProtectedSecret`], key material that is wiped on drop
//! - [`time`]: Unix timestamp helpers
//!
//! # Example
//!
//! ```
//! use sigil_core::{ProtectedSecret, TokenError};
//!
//! let secret = ProtectedSecret::wrap(b"signing-key").unwrap();
//! assert_eq!(secret.expose().len(), 11);
//!
//! assert!(matches!(ProtectedSecret::wrap(b""), Err(TokenError::InvalidSecretKey)));
//! ```

pub mod errors;
pub mod secret;
pub mod time;

// Re-export commonly used types at crate root
pub use errors::TokenError;
pub use secret::{ProtectedSecret, SecretView};
pub use time::now_timestamp;
