//! Logging initialization.

use env_logger::Env;

/// Initializes logging from the `RUST_LOG` environment variable.
///
/// Calling this more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Initializes logging, falling back to `filter` when `RUST_LOG` is unset.
pub fn init_logging_with_filter(filter: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(filter)).try_init();
}
