//! Domain Services
//!
//! The assembly algorithms: quorum election, instance construction, link
//! wiring, port allocation and deferred resolution. No I/O happens here.

pub mod factory;

mod differ;
mod links;
mod ports;
mod quorum;
mod resolver;
mod substitute;

pub use differ::{
    line_stats, unified, ArtifactChange, ArtifactChangeKind, LineStats, PortChange, TopologyDiff,
};
pub use factory::{instance_name, FactorySettings, ServiceInstanceFactory};
pub use links::LinkGraph;
pub use ports::{PortAllocator, PortAssignment};
pub use quorum::QuorumSelector;
pub use resolver::{DeferredConfigResolver, Linked, ResolveContext};
pub use substitute::{substitute, TemplateVars};
