use std::io::IsTerminal;

use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

pub const LOG_VERBOSITY_ENV: &str = "MONORUN_LOG_VERBOSITY";

/// Installs the global subscriber. Everything is logged to stderr, stdout
/// only ever carries the selection.
///
/// ## Logging behaviour:
/// - If `MONORUN_LOG_VERBOSITY` is set it is used as the filter, see the
///   documentation of the RUST_LOG env var for syntax. Otherwise the default
///   level is `WARN`.
/// - A verbosity (usually the `-v` count) overrides the global level but not
///   per-module directives from the env var.
pub fn init(verbosity: u8) {
    let level_override = match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_VERBOSITY_ENV)
        .from_env_lossy();

    let filter = if let Some(max_level) = level_override {
        filter.add_directive(max_level.into())
    } else {
        filter
    };

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity > 1)
        .with_filter(filter);

    Registry::default().with(stderr).init();
}
