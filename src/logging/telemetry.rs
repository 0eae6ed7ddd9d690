use std::str::FromStr;

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{RandomIdGenerator, Sampler},
    Resource,
};
use tracing::info;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const METER_NAME: &str = "reference-data-backend";

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Configuration for logging and OpenTelemetry export
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    /// OTLP endpoint (e.g., "http://localhost:4317")
    pub otlp_endpoint: String,
    pub enable_metrics: bool,
    pub enable_tracing: bool,
    /// Fallback filter when `RUST_LOG` is not a valid directive
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn flag(raw: Option<String>) -> bool {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(false)
}

impl TelemetryConfig {
    /// Build the configuration from any key lookup. Export is off unless
    /// `OTEL_ENABLE_TRACING` / `OTEL_ENABLE_METRICS` are `true`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| "http://localhost:4317".to_string()),
            enable_metrics: flag(lookup("OTEL_ENABLE_METRICS")),
            enable_tracing: flag(lookup("OTEL_ENABLE_TRACING")),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Initialize logging, and OTLP tracing and metrics when enabled.
///
/// # Example
/// ```no_run
/// use reference_data_backend::logging::init_telemetry;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     init_telemetry(None)?;
///     Ok(())
/// }
/// ```
pub fn init_telemetry(config: Option<TelemetryConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.unwrap_or_default();

    let resource = Resource::new(vec![
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            config.service_name.clone(),
        ),
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
            config.service_version.clone(),
        ),
    ]);

    let tracer = if config.enable_tracing {
        let tracer_provider = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(&config.otlp_endpoint),
            )
            .with_trace_config(
                opentelemetry_sdk::trace::Config::default()
                    .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
                    .with_id_generator(RandomIdGenerator::default())
                    .with_resource(resource.clone()),
            )
            .with_batch_config(
                opentelemetry_sdk::trace::BatchConfigBuilder::default()
                    .with_max_queue_size(4096)
                    .with_scheduled_delay(std::time::Duration::from_secs(1))
                    .build(),
            )
            .install_batch(runtime::Tokio)?;

        global::set_tracer_provider(tracer_provider.clone());

        Some(tracer_provider.tracer(METER_NAME))
    } else {
        None
    };

    if config.enable_metrics {
        let meter_provider = opentelemetry_otlp::new_pipeline()
            .metrics(runtime::Tokio)
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(&config.otlp_endpoint),
            )
            .with_resource(resource)
            .with_period(std::time::Duration::from_secs(30))
            .build()?;

        global::set_meter_provider(meter_provider);
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
    };

    let registry = tracing_subscriber::registry().with(fmt_layer);

    if let Some(tracer) = tracer {
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry.with(telemetry_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    info!(
        service = %config.service_name,
        version = %config.service_version,
        tracing = config.enable_tracing,
        metrics = config.enable_metrics,
        format = ?config.log_format,
        "Telemetry initialized"
    );

    Ok(())
}

/// Flush pending spans before exit
pub fn shutdown_telemetry() {
    info!("Shutting down telemetry");
    global::shutdown_tracer_provider();
}

/// Create a counter on the service meter.
/// Without a configured meter provider the counter is a no-op.
pub fn create_counter(name: &str, description: &str) -> opentelemetry::metrics::Counter<u64> {
    let meter = global::meter(METER_NAME);
    meter
        .u64_counter(name.to_string())
        .with_description(description.to_string())
        .init()
}
