//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `inventory/` - Host inventories (TOML file)
//! - `templates/` - Template sources (directory)
//! - `events/` - Assembly event sinks (NDJSON, tracing)

pub mod events;
pub mod inventory;
pub mod templates;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use inventory::{parse_inventory, TomlHostInventory};
pub use templates::DirTemplateSource;
