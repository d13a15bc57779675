use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events the default filter enables.
const SIGIL_TARGETS: [&str; 5] = [
    "sigil",
    "sigil_core",
    "sigil_config",
    "sigil_auth",
    "sigil_cli",
];

/// Builds the default filter directive for `level`, e.g. `sigil=info,sigil_auth=info,...`.
pub fn default_filter(level: &str) -> String {
    SIGIL_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize console logging.
///
/// # Configuration
///
/// - **Filter**: `RUST_LOG` when set, otherwise `LOG_LEVEL` (default: "info")
///   applied to the sigil crates
/// - **Format**: Compact, with module targets and ANSI colors
///
/// Calling this more than once is a no-op.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    // A subscriber may already be installed (tests, embedding binaries).
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
