//! Tracing subscriber setup driven by [`LoggingConfig`]

use crate::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// The filter comes from the configured level only; the process environment
/// is not consulted. Output always goes to stderr so emitted code on stdout
/// stays clean. Calling this twice is harmless: the second call keeps the
/// subscriber that is already installed.
pub fn initialize(config: &LoggingConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed, keeping existing one");
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let level = config
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);
    EnvFilter::default().add_directive(level.into())
}

/// Span wrapping the transform of a single file
pub fn file_span(path: &std::path::Path) -> tracing::Span {
    tracing::info_span!("cachebust", file = %path.display())
}
