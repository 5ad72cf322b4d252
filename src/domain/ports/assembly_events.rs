//! Assembly Event Port
//!
//! Provides an observable interface for the assembly pipeline.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted during assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyEvent {
    /// Assembly started
    Started { cluster: String, host_count: usize },

    /// Coordination ensemble elected
    QuorumElected { members: Vec<String> },

    /// Service instances created and placed on hosts
    InstancesPlaced { instance_count: usize },

    /// Links declared
    LinksWired { link_entries: usize },

    /// External ports assigned
    PortsAllocated { explicit: usize, pooled: usize },

    /// Structure frozen; deferred resolution is about to start
    Frozen { deferred_count: usize },

    /// One artifact resolved
    ArtifactResolved { instance: String, artifact: String },

    /// Assembly completed
    Completed {
        instance_count: usize,
        artifact_count: usize,
    },
}

/// Trait for receiving assembly events
///
/// Implementations can be:
/// - JsonEventSink: NDJSON event stream for CI
/// - TracingEventSink: events forwarded to `tracing`
/// - NoopEventSink: Silent operation
pub trait AssemblyEventSink: Send + Sync {
    /// Handle an assembly event
    fn on_event(&self, event: AssemblyEvent);

    /// Check if this sink wants per-artifact events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl AssemblyEventSink for NoopEventSink {
    fn on_event(&self, _event: AssemblyEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
