//! # Sigil CLI
//!
//! Helpers behind the `sigil-cli` demo binary.
//!
//! ## Usage
//!
//! ```ignore
//! use sigil_cli::session::{build_pair, parse_claim};
//! use sigil_config::TokenSettings;
//!
//! let settings = TokenSettings::from_env();
//! let claims = vec![parse_claim("role=admin")?];
//! let (mut access, mut refresh) = build_pair(&settings, Some("user-1"), claims)?;
//! ```

pub mod session;
