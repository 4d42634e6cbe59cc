//! Tracing initialization for the command line tool.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-target log levels,
/// e.g. `TITLEGROUP_LOG=titlegroup_core=debug`
pub const LOG_ENV: &str = "TITLEGROUP_LOG";

const DEFAULT_FILTER: &str = "titlegroup=info,titlegroup_core=info";

/// Install the stderr subscriber. Stdout is left to the rendered result.
///
/// Falls back to `info` for both crates when `TITLEGROUP_LOG` is unset or
/// invalid. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
