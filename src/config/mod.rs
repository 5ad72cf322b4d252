//! Configuration module for Elkform
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ELKFORM_*)
//! 3. Project config (./elkform.toml)
//! 4. User config (~/.config/elkform/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_env, parse_with_warnings, user_config_path, PROJECT_CONFIG_FILE};
pub use types::{
    ClusterConfig, Config, DataConfig, GatewayConfig, MemoryConfig, PortsConfig,
};
