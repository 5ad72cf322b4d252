//! Gateway port requests

/// Explicit external ports for the cluster's public entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayPorts {
    /// Requested by the proxy's `kibana.http` endpoint
    pub http: Option<u16>,
    /// Requested by the proxy's `kibana.https` endpoint
    pub https: Option<u16>,
    /// Requested by the dashboard's `http` endpoint
    pub dashboard: Option<u16>,
}

impl Default for GatewayPorts {
    fn default() -> Self {
        Self {
            http: Some(80),
            https: Some(443),
            dashboard: None,
        }
    }
}
