//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::AssemblyOptions;
use crate::domain::policies::{GatewayPorts, ImageTags, MemoryPolicy, StoragePolicy, GIB, MIB};
use crate::domain::value_objects::{HostId, PortPool};
use crate::error::ElkformResult;

use super::loader::{self, ConfigWarning};

/// `[cluster]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_cluster_name")]
    pub name: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
        }
    }
}

fn default_cluster_name() -> String {
    "elk".to_string()
}

/// `[ports]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortsConfig {
    #[serde(default = "default_low")]
    pub low: u16,

    #[serde(default = "default_high")]
    pub high: u16,

    /// Explicit external ports keyed by `<instance>/<endpoint>`
    #[serde(default)]
    pub explicit: BTreeMap<String, u16>,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            high: default_high(),
            explicit: BTreeMap::new(),
        }
    }
}

fn default_low() -> u16 {
    PortPool::default().low()
}

fn default_high() -> u16 {
    PortPool::default().high()
}

impl PortsConfig {
    pub fn pool(&self) -> ElkformResult<PortPool> {
        PortPool::new(self.low, self.high)
    }
}

/// `[gateway]`
///
/// A port of 0 means "no explicit request"; the endpoint is then served
/// from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    #[serde(default = "default_https_port")]
    pub https_port: u16,

    #[serde(default)]
    pub dashboard_port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            https_port: default_https_port(),
            dashboard_port: 0,
        }
    }
}

fn default_http_port() -> u16 {
    80
}

fn default_https_port() -> u16 {
    443
}

impl GatewayConfig {
    pub fn ports(&self) -> GatewayPorts {
        let requested = |port: u16| (port != 0).then_some(port);
        GatewayPorts {
            http: requested(self.http_port),
            https: requested(self.https_port),
            dashboard: requested(self.dashboard_port),
        }
    }
}

/// `[memory]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Percent of host memory for the search node (1-100)
    #[serde(default = "default_search_percent")]
    pub search_percent: u8,

    #[serde(default = "default_ensemble_bytes")]
    pub ensemble_bytes: u64,

    #[serde(default = "default_proxy_bytes")]
    pub proxy_bytes: u64,

    #[serde(default = "default_dashboard_bytes")]
    pub dashboard_bytes: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            search_percent: default_search_percent(),
            ensemble_bytes: default_ensemble_bytes(),
            proxy_bytes: default_proxy_bytes(),
            dashboard_bytes: default_dashboard_bytes(),
        }
    }
}

fn default_search_percent() -> u8 {
    75
}

fn default_ensemble_bytes() -> u64 {
    GIB
}

fn default_proxy_bytes() -> u64 {
    256 * MIB
}

fn default_dashboard_bytes() -> u64 {
    128 * MIB
}

impl MemoryConfig {
    pub fn policy(&self) -> MemoryPolicy {
        MemoryPolicy {
            search_percent: self.search_percent,
            ensemble_bytes: self.ensemble_bytes,
            proxy_bytes: self.proxy_bytes,
            dashboard_bytes: self.dashboard_bytes,
        }
    }
}

/// `[data]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_root")]
    pub root: String,

    /// Per-host data root overrides keyed by host id
    #[serde(default)]
    pub hosts: BTreeMap<String, String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
            hosts: BTreeMap::new(),
        }
    }
}

fn default_data_root() -> String {
    "/var/lib".to_string()
}

impl DataConfig {
    pub fn policy(&self) -> StoragePolicy {
        StoragePolicy {
            root: self.root.clone(),
            host_roots: self
                .hosts
                .iter()
                .map(|(host, root)| (HostId::new(host.as_str()), root.clone()))
                .collect(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub images: ImageTags,

    #[serde(default)]
    pub ports: PortsConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub data: DataConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ElkformResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ElkformResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> ElkformResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (ELKFORM_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Assembly inputs described by this configuration
    pub fn assembly_options(&self) -> ElkformResult<AssemblyOptions> {
        let mut options = AssemblyOptions::new(self.cluster.name.clone())
            .with_port_pool(self.ports.pool()?)
            .with_images(self.images.clone())
            .with_memory(self.memory.policy())
            .with_storage(self.data.policy())
            .with_gateway(self.gateway.ports());
        options.explicit_ports = self.ports.explicit.clone();
        Ok(options)
    }
}
