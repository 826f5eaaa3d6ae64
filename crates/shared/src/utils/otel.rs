use crate::utils::metrics::{Method, Metrics, Status};
use anyhow::{Context as _, Result};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider, trace::SdkTracerProvider,
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct Telemetry {
    service_name: String,
    otel_endpoint: String,
}

pub struct TelemetryProviders {
    pub tracer: SdkTracerProvider,
    pub meter: SdkMeterProvider,
    pub logger: SdkLoggerProvider,
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>, otel_endpoint: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            otel_endpoint: otel_endpoint.into(),
        }
    }

    fn get_resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    /// Builds the OTLP exporters and installs the tracer and meter providers
    /// globally. The logger provider is returned for the tracing bridge.
    pub fn init(&self) -> Result<TelemetryProviders> {
        let tracer = self.init_tracer()?;
        let meter = self.init_meter()?;
        let logger = self.init_logger()?;

        Ok(TelemetryProviders {
            tracer,
            meter,
            logger,
        })
    }

    fn init_tracer(&self) -> Result<SdkTracerProvider> {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()
            .context("Failed to create span exporter")?;

        let provider = SdkTracerProvider::builder()
            .with_resource(self.get_resource())
            .with_batch_exporter(exporter)
            .build();

        global::set_tracer_provider(provider.clone());

        Ok(provider)
    }

    fn init_meter(&self) -> Result<SdkMeterProvider> {
        let exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()
            .context("Failed to create metric exporter")?;

        let provider = SdkMeterProvider::builder()
            .with_resource(self.get_resource())
            .with_periodic_exporter(exporter)
            .build();

        global::set_meter_provider(provider.clone());

        Ok(provider)
    }

    fn init_logger(&self) -> Result<SdkLoggerProvider> {
        let exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()
            .context("Failed to create log exporter")?;

        Ok(SdkLoggerProvider::builder()
            .with_resource(self.get_resource())
            .with_batch_exporter(exporter)
            .build())
    }
}

impl TelemetryProviders {
    pub fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracer.shutdown() {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Err(e) = self.meter.shutdown() {
            errors.push(format!("meter provider: {e}"));
        }
        if let Err(e) = self.logger.shutdown() {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Wraps one span plus one metrics sample around a service operation.
///
/// Without an installed tracer provider the global tracer is a no-op, so the
/// spans cost nothing in tests.
#[derive(Clone)]
pub struct OperationTracer {
    tracer_name: &'static str,
    metrics: Metrics,
}

impl OperationTracer {
    pub fn new(tracer_name: &'static str, metrics: Metrics) -> Self {
        Self {
            tracer_name,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message);
    }

    pub fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
