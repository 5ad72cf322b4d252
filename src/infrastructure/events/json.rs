//! JSON Event Sink
//!
//! Outputs assembly events as NDJSON for CI/automation consumption.

use crate::domain::ports::{AssemblyEvent, AssemblyEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Write to stderr, keeping stdout for the topology itself
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl AssemblyEventSink for JsonEventSink {
    fn on_event(&self, event: AssemblyEvent) {
        let json = match event {
            AssemblyEvent::Started {
                cluster,
                host_count,
            } => serde_json::json!({
                "event": "start",
                "command": "assemble",
                "cluster": cluster,
                "host_count": host_count,
            }),

            AssemblyEvent::QuorumElected { members } => serde_json::json!({
                "event": "quorum_elected",
                "members": members,
            }),

            AssemblyEvent::InstancesPlaced { instance_count } => serde_json::json!({
                "event": "instances_placed",
                "instance_count": instance_count,
            }),

            AssemblyEvent::LinksWired { link_entries } => serde_json::json!({
                "event": "links_wired",
                "link_entries": link_entries,
            }),

            AssemblyEvent::PortsAllocated { explicit, pooled } => serde_json::json!({
                "event": "ports_allocated",
                "explicit": explicit,
                "pooled": pooled,
            }),

            AssemblyEvent::Frozen { deferred_count } => serde_json::json!({
                "event": "frozen",
                "deferred_count": deferred_count,
            }),

            AssemblyEvent::ArtifactResolved { instance, artifact } => serde_json::json!({
                "event": "item_resolved",
                "instance": instance,
                "artifact": artifact,
            }),

            AssemblyEvent::Completed {
                instance_count,
                artifact_count,
            } => serde_json::json!({
                "event": "complete",
                "command": "assemble",
                "status": "success",
                "instances": instance_count,
                "artifacts": artifact_count,
            }),
        };

        self.write_event(json);
    }
}
