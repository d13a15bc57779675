//! # Sigil Observability
//!
//! Logging setup for binaries built on sigil.
//!
//! Library crates only emit `tracing` events; a binary installs a subscriber
//! once at startup:
//!
//! ```no_run
//! sigil_observability::init_basic_console_logging();
//! tracing::info!("ready");
//! ```

pub mod basic_logging;

pub use basic_logging::{default_filter, init_basic_console_logging};
