//! ClusterTopology - the finished, fully resolved assembly result
//!
//! This is what gets handed to the deployer. It is plain data: every
//! endpoint carries its external port, every artifact its final content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DataVolume, Endpoint, ResolvedArtifact};
use crate::domain::value_objects::{ContentHash, HostId, ImageRef, PortPool, Role};
use crate::error::ElkformResult;

/// One resolved service instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub name: String,
    pub role: Role,
    pub host: HostId,
    pub address: String,
    pub image: ImageRef,
    pub memory: u64,
    pub endpoints: BTreeMap<String, Endpoint>,
    /// Link name to qualified `<instance>/<endpoint>` targets
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<DataVolume>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub artifacts: BTreeMap<String, ResolvedArtifact>,
}

impl InstanceRecord {
    /// `address:external_port` of an exposed endpoint
    pub fn published_address(&self, endpoint: &str) -> Option<String> {
        let port = self.endpoints.get(endpoint)?.external_port()?;
        Some(format!("{}:{}", self.address, port))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterTopology {
    pub cluster_name: String,
    /// Hosts elected into the coordination ensemble
    pub quorum: Vec<HostId>,
    pub port_pool: PortPool,
    /// Instances in declaration order
    pub instances: Vec<InstanceRecord>,
}

impl ClusterTopology {
    pub fn instance(&self, name: &str) -> Option<&InstanceRecord> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn instances_with_role(&self, role: Role) -> impl Iterator<Item = &InstanceRecord> {
        self.instances.iter().filter(move |i| i.role == role)
    }

    pub fn artifact_count(&self) -> usize {
        self.instances.iter().map(|i| i.artifacts.len()).sum()
    }

    /// Digest of the canonical JSON form
    ///
    /// Identical inputs produce identical fingerprints.
    pub fn fingerprint(&self) -> ElkformResult<ContentHash> {
        let canonical = serde_json::to_vec(self)?;
        Ok(ContentHash::of(canonical))
    }

    pub fn to_json(&self) -> ElkformResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ElkformResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
