//! Elkform - cluster topology assembly for a log-search stack
//!
//! Elkform takes an ordered host inventory and produces a fully resolved
//! deployment topology: a coordination ensemble elected across partitions,
//! a meshed search tier, a reverse proxy and a dashboard, with every
//! external port allocated and every configuration file rendered.
//!
//! Assembly runs in two phases. Instances are placed, linked and given
//! ports on a mutable [`domain::entities::TopologyBuilder`]; the builder is
//! then frozen and deferred configuration is resolved against the frozen
//! graph into a [`ClusterTopology`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{AssemblyOptions, AssemblyPipeline, DiffOutcome, DiffUseCase};
pub use config::Config;
pub use domain::entities::{ClusterTopology, Host, InstanceRecord};
pub use domain::ports::{AssemblyEvent, AssemblyEventSink, HostInventory, TemplateSource};
pub use domain::services::TopologyDiff;
pub use domain::value_objects::{HostId, PortPool, Role};
pub use error::{ElkformError, ElkformResult};
