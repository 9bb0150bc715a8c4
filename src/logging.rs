//! Logging module
//!
//! Module-tagged logging macros on top of `tracing`. Every call site names
//! the module it logs for, e.g. `log_info!(MODULE, "Loaded {} images", n)`,
//! which ends up as the `module` field of the emitted event.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber
///
/// `verbose` forces debug output regardless of `RUST_LOG`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[macro_export]
macro_rules! log_info {
    ($module:expr, $($arg:tt)+) => {
        ::tracing::info!(module = %$module, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $($arg:tt)+) => {
        ::tracing::warn!(module = %$module, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($module:expr, $($arg:tt)+) => {
        ::tracing::error!(module = %$module, $($arg)+)
    };
}

/// Only emitted with `--verbose` or a debug `RUST_LOG`
#[macro_export]
macro_rules! log_debug {
    ($module:expr, $($arg:tt)+) => {
        ::tracing::debug!(module = %$module, $($arg)+)
    };
}
