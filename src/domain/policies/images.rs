//! Image tags policy

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ImageRef, Role};

/// Container image per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTags {
    pub search_node: ImageRef,
    pub ensemble_node: ImageRef,
    pub proxy: ImageRef,
    pub dashboard: ImageRef,
}

impl Default for ImageTags {
    fn default() -> Self {
        Self {
            search_node: ImageRef::new("nikicat/elasticsearch", "latest"),
            ensemble_node: ImageRef::new("nikicat/zookeeper", "latest"),
            proxy: ImageRef::new("nikicat/nginx-elk", "latest"),
            dashboard: ImageRef::new("nikicat/kibana", "latest"),
        }
    }
}

impl ImageTags {
    pub fn for_role(&self, role: Role) -> &ImageRef {
        match role {
            Role::SearchNode => &self.search_node,
            Role::EnsembleNode => &self.ensemble_node,
            Role::Proxy => &self.proxy,
            Role::Dashboard => &self.dashboard,
        }
    }
}
