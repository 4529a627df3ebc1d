#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature this module re-exports the tracing macros. Without
//! it, no-op macros with the same names are exported at the crate root so call
//! sites compile unchanged.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Install a JSON formatter as the global subscriber.
///
/// `filter` uses `EnvFilter` directive syntax (for example
/// `"gridlock_layout=trace"`). `RUST_LOG` wins when it is set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(filter: &str) -> Result<(), String> {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter));
    let env_filter = env_filter.map_err(|e| e.to_string())?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_current_span(true)
        .try_init()
        .map_err(|e| e.to_string())
}
