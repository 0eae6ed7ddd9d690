pub mod telemetry;

pub use telemetry::{create_counter, init_telemetry, shutdown_telemetry, LogFormat, TelemetryConfig};
