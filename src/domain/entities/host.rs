//! Host entity - a machine from the external inventory
//!
//! Hosts are supplied by the caller and never mutated. Instances refer to
//! their host by [`HostId`]; one host may carry several instances.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::HostId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    id: HostId,
    /// Reachable address (FQDN or IP)
    address: String,
    /// Fault-isolation zone (datacenter, rack, availability zone)
    partition: String,
    /// Memory capacity in bytes
    memory: u64,
}

impl Host {
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        partition: impl Into<String>,
        memory: u64,
    ) -> Self {
        Self {
            id: HostId::new(id),
            address: address.into(),
            partition: partition.into(),
            memory,
        }
    }

    pub fn id(&self) -> &HostId {
        &self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn memory(&self) -> u64 {
        self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_deserializes_from_toml() {
        let host: Host = toml::from_str(
            r#"
id = "node1"
address = "node1.elk.example.net"
partition = "dc-east"
memory = 8589934592
"#,
        )
        .unwrap();

        assert_eq!(host.id().as_str(), "node1");
        assert_eq!(host.address(), "node1.elk.example.net");
        assert_eq!(host.partition(), "dc-east");
        assert_eq!(host.memory(), 8 * 1024 * 1024 * 1024);
    }
}
