//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins when set; otherwise the verbosity flag picks the level
//! - Logs go to stderr so command output on stdout stays machine-readable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "traffic_config=debug"
    } else {
        "traffic_config=info"
    }
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(verbose).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "traffic_config=info");
        assert_eq!(default_directive(true), "traffic_config=debug");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
