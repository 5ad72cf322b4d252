//! Host inventory implementations

mod toml_inventory;

pub use toml_inventory::{parse_inventory, MemorySize, TomlHostInventory};
