//! OpenTelemetry-based tracing with a local span log.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → skiphire-spans.jsonl
//! ```
//!
//! Spans land in `~/.local/share/zellij/skiphire/skiphire-spans.jsonl`, one
//! JSON object per line. The file rotates at 5 MiB and keeps two backups
//! (`.1`, `.2`).
//!
//! The level comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `skiphire=trace`), defaulting to `info`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL};
