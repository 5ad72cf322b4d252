//! Tracing Event Sink
//!
//! Forwards assembly events to `tracing` so they land in the same stream as
//! the rest of the diagnostics.

use tracing::{debug, info};

use crate::domain::ports::{AssemblyEvent, AssemblyEventSink};

/// Logs every event; per-artifact events only when `detailed` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink {
    detailed: bool,
}

impl TracingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }
}

impl AssemblyEventSink for TracingEventSink {
    fn on_event(&self, event: AssemblyEvent) {
        match event {
            AssemblyEvent::Started {
                cluster,
                host_count,
            } => info!(%cluster, host_count, "assembly started"),
            AssemblyEvent::QuorumElected { members } => {
                info!(members = %members.join(","), "quorum elected")
            }
            AssemblyEvent::InstancesPlaced { instance_count } => {
                info!(instance_count, "instances placed")
            }
            AssemblyEvent::LinksWired { link_entries } => info!(link_entries, "links wired"),
            AssemblyEvent::PortsAllocated { explicit, pooled } => {
                info!(explicit, pooled, "ports allocated")
            }
            AssemblyEvent::Frozen { deferred_count } => info!(deferred_count, "topology frozen"),
            AssemblyEvent::ArtifactResolved { instance, artifact } => {
                debug!(%instance, %artifact, "artifact resolved")
            }
            AssemblyEvent::Completed {
                instance_count,
                artifact_count,
            } => info!(instance_count, artifact_count, "assembly completed"),
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
