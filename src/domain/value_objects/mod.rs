//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod hash;
mod ids;
mod image;
mod port_pool;
mod role;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use ids::{qualified_endpoint, EndpointRef, HostId, InstanceId};
pub use image::ImageRef;
pub use port_pool::PortPool;
pub use role::Role;
