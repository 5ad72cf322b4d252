//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod assembly_events;
pub mod host_inventory;
pub mod template_source;

pub use assembly_events::{AssemblyEvent, AssemblyEventSink, NoopEventSink};
pub use host_inventory::HostInventory;
pub use template_source::{NoTemplates, TemplateSource};
