//! Logging setup for the driver.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; `verbose` raises the fallback to `debug`.
///
/// # Errors
///
/// Returns [`AppError::Logging`] if a global subscriber is already set.
pub fn init_logging(verbose: bool) -> AppResult<()> {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
