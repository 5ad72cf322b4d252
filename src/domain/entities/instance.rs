//! ServiceInstance entity - one containerized service placed on a host

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ArtifactSource, Endpoint};
use crate::domain::value_objects::{EndpointRef, HostId, ImageRef, Role};

/// Persistent data directory mounted from the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataVolume {
    /// Path inside the container
    pub dest: String,
    /// Path on the host
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ServiceInstance {
    name: String,
    role: Role,
    host: HostId,
    image: ImageRef,
    /// Memory request in bytes
    memory: u64,
    endpoints: BTreeMap<String, Endpoint>,
    links: BTreeMap<String, Vec<EndpointRef>>,
    artifacts: BTreeMap<String, ArtifactSource>,
    /// Mount directories of artifacts kept outside the role's config dir
    artifact_dirs: BTreeMap<String, String>,
    volumes: Vec<DataVolume>,
    env: BTreeMap<String, String>,
}

impl ServiceInstance {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        host: HostId,
        image: ImageRef,
        memory: u64,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            host,
            image,
            memory,
            endpoints: BTreeMap::new(),
            links: BTreeMap::new(),
            artifacts: BTreeMap::new(),
            artifact_dirs: BTreeMap::new(),
            volumes: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_endpoint(mut self, name: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(name.into(), endpoint);
        self
    }

    pub fn with_artifact(mut self, name: impl Into<String>, source: ArtifactSource) -> Self {
        self.artifacts.insert(name.into(), source);
        self
    }

    /// Artifact mounted under `dir` instead of the role's config dir
    pub fn with_artifact_in(
        mut self,
        dir: impl Into<String>,
        name: impl Into<String>,
        source: ArtifactSource,
    ) -> Self {
        let name = name.into();
        self.artifact_dirs.insert(name.clone(), dir.into());
        self.artifacts.insert(name, source);
        self
    }

    pub fn with_volume(mut self, dest: impl Into<String>, path: impl Into<String>) -> Self {
        self.volumes.push(DataVolume {
            dest: dest.into(),
            path: path.into(),
        });
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn host(&self) -> &HostId {
        &self.host
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn memory(&self) -> u64 {
        self.memory
    }

    pub fn endpoints(&self) -> &BTreeMap<String, Endpoint> {
        &self.endpoints
    }

    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    pub fn links(&self) -> &BTreeMap<String, Vec<EndpointRef>> {
        &self.links
    }

    pub fn link(&self, name: &str) -> Option<&[EndpointRef]> {
        self.links.get(name).map(Vec::as_slice)
    }

    pub fn artifacts(&self) -> &BTreeMap<String, ArtifactSource> {
        &self.artifacts
    }

    /// Directory the artifact `name` is mounted under
    pub fn artifact_dir(&self, name: &str) -> &str {
        self.artifact_dirs
            .get(name)
            .map(String::as_str)
            .unwrap_or_else(|| self.role.config_dir())
    }

    pub fn volumes(&self) -> &[DataVolume] {
        &self.volumes
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Replace (never merge) the targets of a named link
    pub(crate) fn set_link(&mut self, name: impl Into<String>, targets: Vec<EndpointRef>) {
        self.links.insert(name.into(), targets);
    }

    pub(crate) fn endpoint_mut(&mut self, name: &str) -> Option<&mut Endpoint> {
        self.endpoints.get_mut(name)
    }
}
