//! Logging setup for the command-line tool.
//!
//! Diagnostics go to stderr so stdout only carries the release report.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "RELEASE_TAG_LOG";

/// Install the global subscriber.
///
/// `RELEASE_TAG_LOG` wins when set; otherwise `verbose` selects `debug` over
/// the default `warn`. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
