//!
//! src/logging.rs
//!
//! Initializes logger on the status stream (stderr); stdout is
//! reserved for the JSON results the pipelines print
//!
//!

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracing_error::ErrorLayer;
use tracing_appender::non_blocking;

use crate::config::{LogFormat, LoggingConfig};

pub struct LoggingGuard(tracing_appender::non_blocking::WorkerGuard);

pub fn init_logging(cfg: &LoggingConfig) ->
    Result<LoggingGuard, crate::errors::SaverError> {

    let (writer, guard) = non_blocking(std::io::stderr());
    let filter = std::env::var("RUST_LOG")
        .ok()
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(cfg.filter_directives.clone()));

    let time = tracing_subscriber::fmt::time::UtcTime::rfc_3339();
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    match cfg.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_timer(time)
                .with_target(cfg.include_target)
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(true);
            registry.with(fmt_layer).init();
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_timer(time)
                .with_target(cfg.include_target)
                .with_ansi(cfg.with_ansi)
                .compact();
            registry.with(fmt_layer).init();
        }
    }

    Ok( LoggingGuard(guard) )
}
