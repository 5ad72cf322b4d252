//! Assembly Options

use std::collections::BTreeMap;

use crate::domain::policies::{GatewayPorts, ImageTags, MemoryPolicy, StoragePolicy};
use crate::domain::services::FactorySettings;
use crate::domain::value_objects::PortPool;

/// Everything the pipeline needs besides hosts and templates
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Cluster name and per-role parameters
    pub settings: FactorySettings,
    /// Range external ports are drawn from
    pub port_pool: PortPool,
    /// Explicit external ports keyed by `<instance>/<endpoint>`
    pub explicit_ports: BTreeMap<String, u16>,
}

impl AssemblyOptions {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            settings: FactorySettings::new(cluster_name),
            ..Self::default()
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.settings.cluster_name
    }

    pub fn with_cluster_name(mut self, name: impl Into<String>) -> Self {
        self.settings.cluster_name = name.into();
        self
    }

    pub fn with_port_pool(mut self, pool: PortPool) -> Self {
        self.port_pool = pool;
        self
    }

    pub fn with_explicit_port(mut self, key: impl Into<String>, port: u16) -> Self {
        self.explicit_ports.insert(key.into(), port);
        self
    }

    pub fn with_images(mut self, images: ImageTags) -> Self {
        self.settings.images = images;
        self
    }

    pub fn with_memory(mut self, memory: MemoryPolicy) -> Self {
        self.settings.memory = memory;
        self
    }

    pub fn with_storage(mut self, storage: StoragePolicy) -> Self {
        self.settings.storage = storage;
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayPorts) -> Self {
        self.settings.gateway = gateway;
        self
    }
}
