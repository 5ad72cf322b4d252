//! Role value object - the closed set of services a cluster is built from

use serde::{Deserialize, Serialize};

/// Service role of an instance
///
/// The set is fixed: every role has a fixed endpoint and link shape, so
/// role-specific behavior is matched on this enum rather than dispatched
/// through a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Elasticsearch data/search node
    SearchNode,
    /// ZooKeeper coordination-ensemble member
    EnsembleNode,
    /// nginx front proxy funnelling external traffic
    Proxy,
    /// Kibana dashboard
    Dashboard,
}

impl Role {
    /// All roles in declaration order
    pub const ALL: [Role; 4] = [
        Role::SearchNode,
        Role::EnsembleNode,
        Role::Proxy,
        Role::Dashboard,
    ];

    /// Service name used as the instance name prefix
    pub fn service_name(&self) -> &'static str {
        match self {
            Role::SearchNode => "elasticsearch",
            Role::EnsembleNode => "zookeeper",
            Role::Proxy => "nginx-elk",
            Role::Dashboard => "kibana",
        }
    }

    /// Directory inside the container where config artifacts are mounted
    pub fn config_dir(&self) -> &'static str {
        match self {
            Role::SearchNode => "/etc/elasticsearch",
            Role::EnsembleNode => "/opt/zookeeper/conf",
            Role::Proxy => "/etc/nginx/sites-enabled",
            Role::Dashboard => "/var/www/kibana/config",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SearchNode => "search-node",
            Role::EnsembleNode => "ensemble-node",
            Role::Proxy => "proxy",
            Role::Dashboard => "dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
