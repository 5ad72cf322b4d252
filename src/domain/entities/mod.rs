//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Host` - A machine supplied by the inventory
//! - `Endpoint` - A named port of an instance
//! - `ServiceInstance` - A service placed on a host
//! - `TopologyBuilder` / `FrozenTopology` - The topology before and after the freeze
//! - `ClusterTopology` - The resolved result handed to the deployer

mod artifact;
mod cluster_topology;
mod endpoint;
mod host;
mod instance;
mod topology;

pub use artifact::{ArtifactContent, ArtifactSource, DeferredFn, ResolvedArtifact};
pub use cluster_topology::{ClusterTopology, InstanceRecord};
pub use endpoint::{Endpoint, Protocol};
pub use host::Host;
pub use instance::{DataVolume, ServiceInstance};
pub use topology::{FrozenTopology, TopologyBuilder};
