//! File-based logging for the catalog binary
//!
//! Sets up tracing-based logging that writes to a daily rolling file, so the
//! category listing printed on stdout stays readable.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// Logs are written to `<directory>/<file_prefix>.YYYY-MM-DD` with daily rotation.
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.directory)?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.directory, &config.file_prefix);

    // Non-blocking so fetch workers never wait on disk
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the lifetime of the process
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))?;

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE); // fetch_categories span timing

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(directory = %config.directory.display(), "Logging initialized");

    Ok(())
}
