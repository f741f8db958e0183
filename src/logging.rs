//! Diagnostic logging
//!
//! `tracing` events go to stderr. `-v` raises the level for this crate;
//! `RUST_LOG` replaces the filter entirely.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn filter_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,xvmem={level}")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(crate::ui::stderr_is_terminal())
        .try_init();
}
