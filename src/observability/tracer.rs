//! Tracer provider exporting spans to the local span log.

use super::file_writer::RotatingWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter writing one JSON line per span.
struct JsonLinesExporter {
    writer: RotatingWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    fn new(file_path: PathBuf, service: &str) -> Self {
        Self {
            writer: RotatingWriter::new(file_path),
            formatter: SpanFormatter::new(service),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        for line in self.formatter.format_batch(batch) {
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider that exports every finished span immediately to
/// `file_path`.
///
/// Exports synchronously: the plugin runtime has no background executor.
pub fn create_tracer_provider(file_path: PathBuf, service: &str) -> TracerProvider {
    let exporter = JsonLinesExporter::new(file_path, service);
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service.to_string(),
    )]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
