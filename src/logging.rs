//! Diagnostic logging to stderr
//!
//! `RUST_LOG` takes precedence. Without it the level follows the `-v` count:
//! warnings only by default, `-v` for info, `-vv` for debug.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a verbosity count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "tabclean=warn",
        1 => "tabclean=info",
        2 => "tabclean=debug",
        _ => "tabclean=trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
