//! Error types for Elkform
//!
//! Uses `thiserror` for library errors. Every variant is fatal for the
//! assembly run that raised it; none is recovered locally.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Elkform operations
pub type ElkformResult<T> = Result<T, ElkformError>;

/// Main error type for Elkform operations
#[derive(Error, Debug)]
pub enum ElkformError {
    /// The host inventory was empty
    #[error("no hosts supplied - the inventory must contain at least one host")]
    EmptyHostSet,

    /// Two hosts share the same identifier
    #[error("duplicate host id '{id}' in inventory")]
    DuplicateHost { id: String },

    /// An instance was placed on a host missing from the inventory
    #[error("instance '{instance}' is placed on unknown host '{host}'")]
    UnknownHost { instance: String, host: String },

    /// A deferred artifact read a link that was never wired
    #[error("instance '{instance}' has no link named '{link}'")]
    MissingLink { instance: String, link: String },

    /// A link or deferred artifact referenced an endpoint absent from the graph
    #[error("endpoint '{endpoint}' not found on instance '{instance}'")]
    MissingEndpoint { instance: String, endpoint: String },

    /// Two distinct endpoints explicitly requested the same external port
    #[error("external port {port} requested by both '{first}' and '{second}'")]
    PortConflict {
        port: u16,
        first: String,
        second: String,
    },

    /// The pool has fewer free ports than endpoints waiting for one
    #[error(
        "port pool {low}-{high} exhausted: {needed} endpoints need a port but only {available} are free"
    )]
    PortPoolExhausted {
        needed: usize,
        available: usize,
        low: u16,
        high: u16,
    },

    /// The port pool bounds are inverted
    #[error("invalid port pool {low}-{high}: low bound exceeds high bound")]
    InvalidPortPool { low: u16, high: u16 },

    /// An explicit port request names an endpoint that is not exposed
    #[error("explicit port request '{key}' does not match any exposed endpoint")]
    UnknownPortRequest { key: String },

    /// An endpoint's external port was assigned twice
    #[error("external port of '{endpoint}' already assigned to {current}")]
    PortAlreadyAssigned { endpoint: String, current: u16 },

    /// An exposed endpoint reached the freeze point without an external port
    #[error("exposed endpoint '{endpoint}' has no external port at freeze")]
    UnallocatedPort { endpoint: String },

    /// Two endpoints ended up with the same external port
    #[error("external port {port} assigned to both '{first}' and '{second}'")]
    DuplicateExternalPort {
        port: u16,
        first: String,
        second: String,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Host inventory could not be parsed
    #[error("invalid host inventory in {file}: {message}")]
    InvalidInventory { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML rendering error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
