//! TOML Host Inventory
//!
//! Implements the HostInventory port over a TOML file:
//!
//! ```toml
//! [[hosts]]
//! id = "node1"
//! address = "10.0.0.1"
//! partition = "dc1"
//! memory = "16G"
//! ```
//!
//! `memory` is either a byte count or a string with a binary `K`/`M`/`G`/`T`
//! suffix. `partition` defaults to `default`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::Host;
use crate::domain::ports::HostInventory;
use crate::error::{ElkformError, ElkformResult};

/// Memory capacity as written in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemorySize {
    Bytes(u64),
    Text(String),
}

impl MemorySize {
    pub fn bytes(&self) -> Result<u64, String> {
        match self {
            MemorySize::Bytes(bytes) => Ok(*bytes),
            MemorySize::Text(text) => parse_size(text),
        }
    }
}

fn parse_size(text: &str) -> Result<u64, String> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_suffix(['b', 'B'])
        .filter(|rest| rest.ends_with(|c: char| c.is_ascii_alphabetic()))
        .unwrap_or(trimmed);
    let (digits, shift) = match trimmed.char_indices().last() {
        Some((idx, 'k' | 'K')) => (&trimmed[..idx], 10),
        Some((idx, 'm' | 'M')) => (&trimmed[..idx], 20),
        Some((idx, 'g' | 'G')) => (&trimmed[..idx], 30),
        Some((idx, 't' | 'T')) => (&trimmed[..idx], 40),
        _ => (trimmed, 0),
    };
    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid memory size '{}'", text))?;
    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| format!("memory size '{}' is too large", text))
}

#[derive(Debug, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
struct HostEntry {
    id: String,
    address: String,
    #[serde(default = "default_partition")]
    partition: String,
    memory: MemorySize,
}

fn default_partition() -> String {
    "default".to_string()
}

/// Parse inventory text; `path` is only used in diagnostics
pub fn parse_inventory(content: &str, path: &Path) -> ElkformResult<Vec<Host>> {
    let invalid = |message: String| ElkformError::InvalidInventory {
        file: path.to_path_buf(),
        message,
    };

    let deserializer = toml::de::Deserializer::new(content);
    let file: InventoryFile = serde_ignored::deserialize(deserializer, |key| {
        warn!(file = %path.display(), key = %key, "unknown inventory key");
    })
    .map_err(|e| invalid(e.to_string()))?;

    file.hosts
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            if entry.id.trim().is_empty() {
                return Err(invalid(format!("host #{} has an empty id", idx + 1)));
            }
            if entry.address.trim().is_empty() {
                return Err(invalid(format!("host '{}' has an empty address", entry.id)));
            }
            let memory = entry
                .memory
                .bytes()
                .map_err(|e| invalid(format!("host '{}': {}", entry.id, e)))?;
            Ok(Host::new(entry.id, entry.address, entry.partition, memory))
        })
        .collect()
}

/// Host inventory stored as a TOML file
pub struct TomlHostInventory {
    path: PathBuf,
}

impl TomlHostInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HostInventory for TomlHostInventory {
    fn load_hosts(&self) -> ElkformResult<Vec<Host>> {
        let content = fs::read_to_string(&self.path)?;
        parse_inventory(&content, &self.path)
    }
}
