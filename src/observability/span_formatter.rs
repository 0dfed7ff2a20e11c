//! Span to JSON-line conversion.
//!
//! Each finished span becomes one flat JSON object:
//!
//! ```json
//! {"service":"skiphire","name":"handle_event","trace_id":"…","span_id":"…",
//!  "parent_span_id":null,"start":"2026-10-19T09:12:03.118Z","duration_us":412,
//!  "attributes":{"event_type":"Select(2)"},"events":[],"status":"unset"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};
use std::time::SystemTime;

/// Formats finished spans as JSON lines tagged with the service name.
#[derive(Debug, Clone)]
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// One JSON document per span, in batch order.
    pub fn format_batch(&self, batch: &[SpanData]) -> Vec<String> {
        batch.iter().map(|span| self.format_span(span).to_string()).collect()
    }

    fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| d.as_micros());

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "time": timestamp(event.timestamp),
                    "attributes": attribute_map(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "name": span.name,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "start": timestamp(span.start_time),
            "duration_us": u64::try_from(duration_us).unwrap_or(u64::MAX),
            "attributes": attribute_map(&span.attributes),
            "events": events,
            "status": status(&span.status),
        })
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn attribute_map(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

/// Scalars map to their JSON counterparts; arrays are kept as their string
/// rendering.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}
