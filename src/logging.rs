use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the file every log event is appended to.
pub const LOG_FILE: &str = "combined.log";

/// Install the global subscriber: JSON events to stdout and to
/// `<log_dir>/combined.log`.
///
/// `RUST_LOG` wins over `default_level`. The returned guard flushes the
/// file writer on drop and must be held for the life of the process.
pub fn init(log_dir: &Path, default_level: &str) -> anyhow::Result<WorkerGuard> {
    let (file_writer, guard) = file_writer(log_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer(std::io::stdout))
        .with(json_layer(file_writer))
        .try_init()?;

    Ok(guard)
}

/// Non-blocking writer appending to `<log_dir>/combined.log`.
pub fn file_writer(log_dir: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    Ok(tracing_appender::non_blocking(appender))
}

/// One JSON object per event, written to `writer`.
pub fn json_layer<S, W>(writer: W) -> fmt::Layer<S, JsonFields, Format<Json>, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer().json().with_ansi(false).with_writer(writer)
}
