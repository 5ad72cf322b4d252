//! Endpoint entity - a named network port ("door") of a service instance
//!
//! The internal port is fixed when the endpoint is declared. The external
//! port starts unset and may be assigned exactly once by the port allocator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Protocol/schema tag of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Tcp,
}

impl Protocol {
    /// URL scheme for this protocol
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Tcp => "tcp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    protocol: Protocol,
    internal_port: u16,
    /// Whether this endpoint must be published on the host
    exposed: bool,
    /// Explicit external port requested at declaration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requested_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_port: Option<u16>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    paths: BTreeMap<String, String>,
}

impl Endpoint {
    /// Endpoint reachable only from other instances
    pub fn internal(protocol: Protocol, port: u16) -> Self {
        Self {
            protocol,
            internal_port: port,
            exposed: false,
            requested_port: None,
            external_port: None,
            paths: BTreeMap::new(),
        }
    }

    /// Endpoint that needs an external port
    pub fn exposed(protocol: Protocol, port: u16) -> Self {
        Self {
            exposed: true,
            ..Self::internal(protocol, port)
        }
    }

    /// Request a specific external port (implies exposure)
    pub fn with_requested_port(mut self, port: Option<u16>) -> Self {
        if port.is_some() {
            self.exposed = true;
        }
        self.requested_port = port;
        self
    }

    pub fn with_path(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(name.into(), path.into());
        self
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn internal_port(&self) -> u16 {
        self.internal_port
    }

    pub fn is_exposed(&self) -> bool {
        self.exposed
    }

    pub fn requested_port(&self) -> Option<u16> {
        self.requested_port
    }

    pub fn external_port(&self) -> Option<u16> {
        self.external_port
    }

    pub fn paths(&self) -> &BTreeMap<String, String> {
        &self.paths
    }

    /// Assign the external port. Fails with the current value if already set.
    pub(crate) fn assign_external(&mut self, port: u16) -> Result<(), u16> {
        match self.external_port {
            Some(current) => Err(current),
            None => {
                self.external_port = Some(port);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_endpoint_is_not_exposed() {
        let ep = Endpoint::internal(Protocol::Tcp, 9300);
        assert!(!ep.is_exposed());
        assert_eq!(ep.internal_port(), 9300);
        assert_eq!(ep.external_port(), None);
    }

    #[test]
    fn requested_port_implies_exposure() {
        let ep = Endpoint::internal(Protocol::Http, 80).with_requested_port(Some(8080));
        assert!(ep.is_exposed());
        assert_eq!(ep.requested_port(), Some(8080));
    }

    #[test]
    fn external_port_is_write_once() {
        let mut ep = Endpoint::exposed(Protocol::Http, 9200);
        assert_eq!(ep.assign_external(31000), Ok(()));
        assert_eq!(ep.assign_external(31001), Err(31000));
        assert_eq!(ep.external_port(), Some(31000));
    }

    #[test]
    fn serialized_form_omits_unset_fields() {
        let ep = Endpoint::internal(Protocol::Tcp, 2181);
        let json = serde_json::to_value(&ep).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "protocol": "tcp",
                "internal_port": 2181,
                "exposed": false,
            })
        );
    }
}
