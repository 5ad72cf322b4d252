//! Identifier value objects
//!
//! Instances live in an arena owned by the topology; everything that points
//! at an instance (links, quorum, resolution contexts) stores an
//! [`InstanceId`] instead of a reference, so mutually linked instances never
//! form an ownership cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host identifier as supplied by the inventory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Stable index of an instance in the topology arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(usize);

impl InstanceId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a named endpoint on another instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointRef {
    pub instance: InstanceId,
    pub endpoint: String,
}

impl EndpointRef {
    pub fn new(instance: InstanceId, endpoint: impl Into<String>) -> Self {
        Self {
            instance,
            endpoint: endpoint.into(),
        }
    }
}

/// Qualified `<instance>/<endpoint>` key used in port requests and errors
pub fn qualified_endpoint(instance: &str, endpoint: &str) -> String {
    format!("{}/{}", instance, endpoint)
}
