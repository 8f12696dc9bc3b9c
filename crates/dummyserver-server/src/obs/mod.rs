//! Observability: structured counter events, log subscriber setup, and
//! in-process Prometheus counters rendered by `/metrics`.

pub mod events;
pub mod metrics;

use std::io;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use dummyserver_core::error::{CounterError, Result};

use crate::config::{LogFormat, LoggingSection};

pub use events::{CounterEvent, EventSink, TracingSink};
pub use metrics::ServerMetrics;

/// Install the global subscriber writing to stdout. `RUST_LOG` overrides
/// `logging.filter`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// lifetime of the server.
pub fn init_logging(cfg: &LoggingSection) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.filter))
        .map_err(|e| CounterError::Validation(format!("invalid log filter: {e}")))?;

    let (subscriber, guard) = build_subscriber(io::stdout(), filter, cfg.format);
    subscriber
        .try_init()
        .map_err(|e| CounterError::Internal(format!("log subscriber init failed: {e}")))?;
    Ok(guard)
}

/// Subscriber whose formatter hands lines to a background writer thread, so
/// emitting an event never waits on `writer`.
pub fn build_subscriber<W>(
    writer: W,
    filter: EnvFilter,
    format: LogFormat,
) -> (impl Subscriber + Send + Sync + 'static, WorkerGuard)
where
    W: io::Write + Send + 'static,
{
    let (writer, guard) = tracing_appender::non_blocking(writer);
    let fmt_layer = match format {
        LogFormat::Pretty => fmt::layer().with_writer(writer).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);
    (subscriber, guard)
}
