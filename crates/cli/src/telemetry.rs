//! Logging setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs a console subscriber. `RUST_LOG` wins over `level`.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
