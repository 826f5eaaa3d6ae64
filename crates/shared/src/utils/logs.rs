use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber: pretty console output filtered by
/// `RUST_LOG`, an optional JSON rolling file, and an optional OpenTelemetry
/// log bridge.
///
/// The returned guard must be held for the life of the process, otherwise
/// buffered file output is dropped.
pub fn init_logger(
    component: &str,
    is_dev: bool,
    enable_file: bool,
    otel_provider: Option<&SdkLoggerProvider>,
) -> Option<WorkerGuard> {
    let (file_layer, guard) = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_layer = otel_provider.map(|provider| {
        let otel_filter = EnvFilter::new(
            "info,hyper=off,opentelemetry=off,tonic=off,h2=off,reqwest=off,sqlx=off",
        );
        OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_hands_back_its_worker_guard() {
        let guard = init_logger("logs-test", true, true, None);
        assert!(guard.is_some());

        tracing::info!("file logger installed");
    }
}
