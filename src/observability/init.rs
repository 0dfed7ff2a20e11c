//! Tracing subscriber setup.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "skiphire";

/// Level used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` from `trace_level`, then an
/// OpenTelemetry layer exporting to the span log.
///
/// Does nothing if the data directory cannot be created. Only the first
/// call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .as_deref()
        .unwrap_or(DEFAULT_TRACE_LEVEL);

    if std::fs::create_dir_all(paths::get_data_dir()).is_err() {
        return;
    }

    let provider = tracer::create_tracer_provider(paths::trace_file(), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
