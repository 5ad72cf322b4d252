//! Service instance factory
//!
//! Builds one fully declared [`ServiceInstance`] for a host and a role:
//! endpoints, image, memory request, data volumes, environment and the
//! artifact sources. Links and external ports are left for later phases.
//! Building has no side effects.

pub mod dashboard;
pub mod ensemble_node;
pub mod proxy;
pub mod search_node;

use std::sync::Arc;

use crate::domain::entities::{ArtifactContent, ArtifactSource, Host, ServiceInstance};
use crate::domain::policies::{GatewayPorts, ImageTags, MemoryPolicy, StoragePolicy};
use crate::domain::ports::{NoTemplates, TemplateSource};
use crate::domain::value_objects::Role;

/// Per-role parameters applied by the factory
#[derive(Debug, Clone, Default)]
pub struct FactorySettings {
    pub cluster_name: String,
    pub images: ImageTags,
    pub memory: MemoryPolicy,
    pub storage: StoragePolicy,
    pub gateway: GatewayPorts,
}

impl FactorySettings {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            ..Self::default()
        }
    }
}

pub struct ServiceInstanceFactory {
    settings: FactorySettings,
    templates: Arc<dyn TemplateSource>,
}

impl ServiceInstanceFactory {
    pub fn new(settings: FactorySettings) -> Self {
        Self {
            settings,
            templates: Arc::new(NoTemplates),
        }
    }

    /// Source for immediate artifact text
    pub fn with_templates(mut self, templates: Arc<dyn TemplateSource>) -> Self {
        self.templates = templates;
        self
    }

    pub fn settings(&self) -> &FactorySettings {
        &self.settings
    }

    /// Build the instance of `role` placed on `host`
    pub fn build(&self, host: &Host, role: Role) -> ServiceInstance {
        match role {
            Role::SearchNode => search_node::build(self, host),
            Role::EnsembleNode => ensemble_node::build(self, host),
            Role::Proxy => proxy::build(self, host),
            Role::Dashboard => dashboard::build(self, host),
        }
    }

    /// Instance skeleton shared by every role
    fn base(&self, host: &Host, role: Role) -> ServiceInstance {
        ServiceInstance::new(
            instance_name(role, host),
            role,
            host.id().clone(),
            self.settings.images.for_role(role).clone(),
            self.settings.memory.request(role, host),
        )
    }

    /// Data volume at `/var/lib/<service>` backed by the host's data root
    fn with_data_volume(&self, instance: ServiceInstance, host: &Host) -> ServiceInstance {
        let service = instance.role().service_name();
        let path = self.settings.storage.data_path(host.id(), service);
        instance.with_volume(format!("/var/lib/{}", service), path)
    }

    /// Immediate artifact whose text comes from the template source when
    /// it has one, else from the built-in default
    fn immediate(&self, name: &str, builtin: &str) -> ArtifactSource {
        let text = self
            .templates
            .template(name)
            .unwrap_or_else(|| builtin.to_string());
        ArtifactSource::Immediate(ArtifactContent::Text(text))
    }
}

/// `<service>-<host id>`
pub fn instance_name(role: Role, host: &Host) -> String {
    format!("{}-{}", role.service_name(), host.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policies::GIB;

    struct MappingOverride;

    impl TemplateSource for MappingOverride {
        fn template(&self, name: &str) -> Option<String> {
            (name == "mapping.json").then(|| "{\"custom\": true}\n".to_string())
        }
    }

    fn host() -> Host {
        Host::new("node1", "10.0.0.1", "dc1", 8 * GIB)
    }

    #[test]
    fn names_follow_service_and_host() {
        let factory = ServiceInstanceFactory::new(FactorySettings::new("logs"));
        let names: Vec<String> = Role::ALL
            .iter()
            .map(|role| factory.build(&host(), *role).name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "elasticsearch-node1",
                "zookeeper-node1",
                "nginx-elk-node1",
                "kibana-node1"
            ]
        );
    }

    #[test]
    fn build_declares_no_links_and_no_external_ports() {
        let factory = ServiceInstanceFactory::new(FactorySettings::new("logs"));
        for role in Role::ALL {
            let instance = factory.build(&host(), role);
            assert!(instance.links().is_empty());
            assert!(instance
                .endpoints()
                .values()
                .all(|e| e.external_port().is_none()));
        }
    }

    #[test]
    fn immediate_artifacts_prefer_template_text() {
        let factory = ServiceInstanceFactory::new(FactorySettings::new("logs"))
            .with_templates(Arc::new(MappingOverride));
        let instance = factory.build(&host(), Role::SearchNode);

        match &instance.artifacts()["mapping.json"] {
            ArtifactSource::Immediate(content) => {
                assert_eq!(content.render().unwrap(), "{\"custom\": true}\n")
            }
            other => panic!("expected immediate artifact, got {:?}", other),
        }
        assert!(matches!(
            instance.artifacts()["logging.yml"],
            ArtifactSource::Immediate(_)
        ));
    }

    #[test]
    fn data_volumes_follow_storage_policy() {
        let mut settings = FactorySettings::new("logs");
        settings.storage.root = "/srv".to_string();
        let factory = ServiceInstanceFactory::new(settings);

        let instance = factory.build(&host(), Role::EnsembleNode);
        assert_eq!(instance.volumes()[0].dest, "/var/lib/zookeeper");
        assert_eq!(instance.volumes()[0].path, "/srv/zookeeper");

        let proxy = factory.build(&host(), Role::Proxy);
        assert_eq!(proxy.volumes()[0].dest, "/var/log/nginx");
        assert_eq!(proxy.volumes()[0].path, "/srv/nginx-elk/logs");
    }
}
