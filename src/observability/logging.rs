//! Tracing subscriber setup

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Parse a configured level name (`trace`, `debug`, `info`, `warn`, `error`)
pub fn parse_level(level: &str) -> Option<Level> {
    level.trim().parse::<Level>().ok()
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `level`. Installing twice is a no-op.
pub fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
