//! Logging setup built on `tracing`.
//!
//! Everything goes to stderr so that stdout carries only the rendered graph
//! and can be piped straight into `dot`.
//!
//! The filter is chosen in this order:
//! 1. `--verbose`: debug for this crate
//! 2. `--quiet`: errors only
//! 3. `PORT_DEPTREE_LOG` environment variable
//! 4. info for this crate

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "PORT_DEPTREE_LOG";

pub fn env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("port_deptree=debug")
    } else if quiet {
        EnvFilter::new("port_deptree=error")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("port_deptree=info"))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
