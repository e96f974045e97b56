use tracing_subscriber::EnvFilter;

use super::formatter::BracketedFormatter;

/// Initialize the tracing subscriber with the bracketed format.
/// `RUST_LOG` overrides the default `info` level.
pub fn setup_logging() {
    tracing_subscriber::fmt()
        .event_format(BracketedFormatter)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
