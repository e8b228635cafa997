//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr
///
/// Without `debug` the level is fixed at `info`. With `debug` the default is
/// `debug` and `RUST_LOG` may override it. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
