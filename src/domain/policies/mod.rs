//! Domain Policies
//!
//! Per-role rules the instance factory applies: which image to run, how
//! much memory to request, where data lives and which gateway ports the
//! public endpoints ask for. Pure values, filled from configuration.

mod gateway;
mod images;
mod memory;
mod storage;

pub use gateway::GatewayPorts;
pub use images::ImageTags;
pub use memory::{MemoryPolicy, GIB, MIB};
pub use storage::StoragePolicy;
