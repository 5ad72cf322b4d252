//! HostInventory port - abstraction for obtaining the host list
//!
//! The engine only needs "an ordered sequence of hosts". Where it comes from
//! (a TOML file, a CMDB, a cloud API) is an infrastructure concern.

use crate::domain::entities::Host;
use crate::error::ElkformResult;

/// Source of hosts, in inventory order
pub trait HostInventory {
    fn load_hosts(&self) -> ElkformResult<Vec<Host>>;
}

/// Fixed, already-resolved host list
impl HostInventory for Vec<Host> {
    fn load_hosts(&self) -> ElkformResult<Vec<Host>> {
        Ok(self.clone())
    }
}
