//! # Sigil Config
//!
//! Configuration types for sigil, loaded from environment variables.
//!
//! - [`token`]: Secrets, lifetimes and claim defaults for access and refresh tokens
//!
//! # Example
//!
//! ```ignore
//! use sigil_config::TokenSettings;
//!
//! let settings = TokenSettings::from_env();
//! println!("access tokens live {}s", settings.access.expiry_seconds);
//! ```

pub mod token;

// Re-export commonly used types at crate root
pub use token::{TokenLifetime, TokenSettings};
