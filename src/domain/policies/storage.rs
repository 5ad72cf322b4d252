//! Data volume placement policy

use std::collections::BTreeMap;

use crate::domain::value_objects::HostId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePolicy {
    /// Host directory under which every service keeps its data
    pub root: String,
    /// Per-host replacements for `root`
    pub host_roots: BTreeMap<HostId, String>,
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            root: "/var/lib".to_string(),
            host_roots: BTreeMap::new(),
        }
    }
}

impl StoragePolicy {
    pub fn root_for(&self, host: &HostId) -> &str {
        self.host_roots.get(host).unwrap_or(&self.root)
    }

    /// Host path for `service` data on `host`
    pub fn data_path(&self, host: &HostId, service: &str) -> String {
        format!("{}/{}", self.root_for(host).trim_end_matches('/'), service)
    }
}
