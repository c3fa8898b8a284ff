use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "survey_normalizer=info";

/// Initializes the logging system with both console and file output.
///
/// The returned guard must be held for the life of the process so buffered
/// file output is flushed on exit.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // Console goes to stderr; stdout carries the run report
    if fs::create_dir_all(log_dir).is_err() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        tracing::warn!(dir = %log_dir.display(), "log directory unavailable, console logging only");
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, "survey_normalizer.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Some(guard)
}
