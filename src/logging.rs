//! Diagnostic logging setup.
//!
//! Guidance for the user is printed directly; `tracing` output is for
//! debugging the tool itself and goes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "BOWER_AWAY_LOG";

/// Installs the global subscriber. `BOWER_AWAY_LOG` wins over `verbose`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
