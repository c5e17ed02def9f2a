//! Per-layer log filters for the stderr and JSON file subscribers.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Builds a layer filter from the directives in `env_var`, using `default`
/// only when the variable is unset, empty or entirely invalid.
pub fn layer_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
    let directives = std::env::var(env_var).unwrap_or_default();
    parse_layer_filter(&directives, default)
}

/// Parses `directives`, ignoring invalid ones. A level set by the user wins
/// over `default`, including levels quieter than it.
pub fn parse_layer_filter(directives: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives)
}
