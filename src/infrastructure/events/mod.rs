//! Event Sink Implementations
//!
//! Concrete implementations of AssemblyEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: events forwarded to the `tracing` subscriber

mod json;
mod log_sink;

pub use json::JsonEventSink;
pub use log_sink::TracingEventSink;
