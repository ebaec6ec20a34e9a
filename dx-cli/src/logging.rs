use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FALLBACK_LEVEL: &str = "warn";

/// Normalise a configured level, falling back to `warn` for unknown values.
pub fn resolve_level(level: &str) -> Option<&'static str> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Install the global subscriber.
///
/// Diagnostics go to stderr so stdout carries only the report; `RUST_LOG`
/// refines the filter on top of `level`.
pub fn init_logging(level: &str) {
    let resolved = resolve_level(level);
    let directive = resolved.unwrap_or(FALLBACK_LEVEL);

    let filter = EnvFilter::builder()
        .with_default_directive(
            directive
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();

    if resolved.is_none() {
        tracing::warn!("Invalid log level '{}', defaulting to '{}'", level, FALLBACK_LEVEL);
    }
}
