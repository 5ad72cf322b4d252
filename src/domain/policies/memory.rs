//! Memory request policy

use crate::domain::entities::Host;
use crate::domain::value_objects::Role;

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

/// How much memory each role asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPolicy {
    /// Share of host memory given to the search node, in percent
    pub search_percent: u8,
    pub ensemble_bytes: u64,
    pub proxy_bytes: u64,
    pub dashboard_bytes: u64,
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self {
            search_percent: 75,
            ensemble_bytes: GIB,
            proxy_bytes: 256 * MIB,
            dashboard_bytes: 128 * MIB,
        }
    }
}

impl MemoryPolicy {
    /// Memory request in bytes for `role` placed on `host`
    pub fn request(&self, role: Role, host: &Host) -> u64 {
        match role {
            Role::SearchNode => {
                let share = u128::from(host.memory()) * u128::from(self.search_percent) / 100;
                u64::try_from(share).unwrap_or(u64::MAX)
            }
            Role::EnsembleNode => self.ensemble_bytes,
            Role::Proxy => self.proxy_bytes,
            Role::Dashboard => self.dashboard_bytes,
        }
    }
}
