//! Deferred configuration resolver
//!
//! Runs after the freeze. Every artifact of every instance is evaluated
//! exactly once against the same immutable snapshot, so evaluation order
//! carries no meaning. The first failure aborts the whole resolution and
//! nothing resolved so far escapes.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::{
    ArtifactContent, ArtifactSource, ClusterTopology, Endpoint, FrozenTopology, Host,
    InstanceRecord, ResolvedArtifact, ServiceInstance,
};
use crate::domain::ports::{AssemblyEvent, AssemblyEventSink, TemplateSource};
use crate::domain::services::substitute::{substitute, TemplateVars};
use crate::domain::value_objects::{qualified_endpoint, EndpointRef, InstanceId, Role};
use crate::error::{ElkformError, ElkformResult};

/// A link target resolved against the frozen graph
#[derive(Debug, Clone, Copy)]
pub struct Linked<'a> {
    pub instance: &'a ServiceInstance,
    pub host: &'a Host,
    pub name: &'a str,
    pub endpoint: &'a Endpoint,
}

impl<'a> Linked<'a> {
    /// `address:internal_port`, for traffic between instances
    pub fn internal_address(&self) -> String {
        format!("{}:{}", self.host.address(), self.endpoint.internal_port())
    }

    /// `address:external_port`, for traffic entering through the host
    pub fn external_address(&self) -> ElkformResult<String> {
        let port = self
            .endpoint
            .external_port()
            .ok_or_else(|| ElkformError::UnallocatedPort {
                endpoint: self.qualified_name(),
            })?;
        Ok(format!("{}:{}", self.host.address(), port))
    }

    pub fn qualified_name(&self) -> String {
        qualified_endpoint(self.instance.name(), self.name)
    }
}

/// Read-only view handed to a deferred artifact
pub struct ResolveContext<'a> {
    topology: &'a FrozenTopology,
    instance: &'a ServiceInstance,
    host: &'a Host,
    templates: &'a dyn TemplateSource,
}

impl<'a> ResolveContext<'a> {
    pub fn topology(&self) -> &'a FrozenTopology {
        self.topology
    }

    pub fn cluster_name(&self) -> &'a str {
        self.topology.cluster_name()
    }

    /// The instance owning the artifact being resolved
    pub fn instance(&self) -> &'a ServiceInstance {
        self.instance
    }

    pub fn host(&self) -> &'a Host {
        self.host
    }

    /// One of the instance's own endpoints
    pub fn own_endpoint(&self, name: &str) -> ElkformResult<&'a Endpoint> {
        self.instance
            .endpoint(name)
            .ok_or_else(|| ElkformError::MissingEndpoint {
                instance: self.instance.name().to_string(),
                endpoint: name.to_string(),
            })
    }

    /// Targets of a named link on the owning instance
    pub fn link(&self, name: &str) -> ElkformResult<&'a [EndpointRef]> {
        self.instance
            .link(name)
            .ok_or_else(|| ElkformError::MissingLink {
                instance: self.instance.name().to_string(),
                link: name.to_string(),
            })
    }

    /// Resolve a single endpoint reference
    pub fn endpoint(&self, target: &EndpointRef) -> ElkformResult<Linked<'a>> {
        let missing = || ElkformError::MissingEndpoint {
            instance: self
                .topology
                .instance(target.instance)
                .map(|i| i.name().to_string())
                .unwrap_or_else(|| target.instance.to_string()),
            endpoint: target.endpoint.clone(),
        };
        let (instance, endpoint) = self.topology.endpoint(target).ok_or_else(missing)?;
        let host = self
            .topology
            .host(instance.host())
            .ok_or_else(|| unknown_host(instance))?;
        let (name, _) = instance
            .endpoints()
            .get_key_value(target.endpoint.as_str())
            .ok_or_else(missing)?;
        Ok(Linked {
            instance,
            host,
            name,
            endpoint,
        })
    }

    /// Resolve every target of a named link, in link order
    pub fn linked(&self, name: &str) -> ElkformResult<Vec<Linked<'a>>> {
        self.link(name)?
            .iter()
            .map(|target| self.endpoint(target))
            .collect()
    }

    /// Ensemble instances ordered by their host's position in the quorum
    pub fn quorum_members(&self) -> Vec<&'a ServiceInstance> {
        let ensemble: Vec<&ServiceInstance> = self
            .topology
            .ids_with_role(Role::EnsembleNode)
            .into_iter()
            .filter_map(|id| self.topology.instance(id))
            .collect();
        self.topology
            .quorum()
            .iter()
            .filter_map(|host| ensemble.iter().copied().find(|i| i.host() == host))
            .collect()
    }

    /// Template override text for an artifact, if one was supplied
    pub fn template(&self, name: &str) -> Option<String> {
        self.templates.template(name)
    }

    /// Render the override template for `name` with `vars`, or fall back
    /// to the built-in rendering when no template was supplied.
    pub fn render_or<F>(
        &self,
        name: &str,
        vars: &TemplateVars,
        builtin: F,
    ) -> ElkformResult<ArtifactContent>
    where
        F: FnOnce() -> ElkformResult<ArtifactContent>,
    {
        match self.template(name) {
            Some(template) => Ok(ArtifactContent::Text(substitute(&template, vars))),
            None => builtin(),
        }
    }

    /// Keys every template may use
    pub fn base_vars(&self) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.insert("cluster", self.cluster_name().to_string());
        vars.insert("instance", self.instance.name().to_string());
        vars.insert("host", self.host.id().to_string());
        vars.insert("address", self.host.address().to_string());
        vars
    }
}

fn unknown_host(instance: &ServiceInstance) -> ElkformError {
    ElkformError::UnknownHost {
        instance: instance.name().to_string(),
        host: instance.host().to_string(),
    }
}

/// Evaluates deferred artifacts over a frozen topology
pub struct DeferredConfigResolver<'t> {
    templates: &'t dyn TemplateSource,
}

impl<'t> DeferredConfigResolver<'t> {
    pub fn new(templates: &'t dyn TemplateSource) -> Self {
        Self { templates }
    }

    /// Resolve every artifact and build the finished topology
    ///
    /// Events for resolved artifacts are emitted only once the whole
    /// topology resolved, so a failed run reports no artifacts.
    pub fn resolve(
        &self,
        topology: &FrozenTopology,
        events: &dyn AssemblyEventSink,
    ) -> ElkformResult<ClusterTopology> {
        let instances = topology
            .ids()
            .map(|id| self.resolve_instance(topology, id))
            .collect::<ElkformResult<Vec<_>>>()?;

        if events.wants_detailed_events() {
            for record in &instances {
                for artifact in record.artifacts.keys() {
                    events.on_event(AssemblyEvent::ArtifactResolved {
                        instance: record.name.clone(),
                        artifact: artifact.clone(),
                    });
                }
            }
        }

        Ok(ClusterTopology {
            cluster_name: topology.cluster_name().to_string(),
            quorum: topology.quorum().to_vec(),
            port_pool: topology.pool(),
            instances,
        })
    }

    fn resolve_instance(
        &self,
        topology: &FrozenTopology,
        id: InstanceId,
    ) -> ElkformResult<InstanceRecord> {
        let instance = topology
            .instance(id)
            .ok_or_else(|| ElkformError::MissingEndpoint {
                instance: id.to_string(),
                endpoint: String::new(),
            })?;
        let host = topology
            .host(instance.host())
            .ok_or_else(|| unknown_host(instance))?;
        let ctx = ResolveContext {
            topology,
            instance,
            host,
            templates: self.templates,
        };

        let mut artifacts = BTreeMap::new();
        for (name, source) in instance.artifacts() {
            let content = match source {
                ArtifactSource::Immediate(content) => content.clone(),
                ArtifactSource::Deferred(f) => f(&ctx)?,
            };
            let path = format!("{}/{}", instance.artifact_dir(name), name);
            debug!(instance = instance.name(), artifact = %name, "resolved artifact");
            artifacts.insert(name.clone(), ResolvedArtifact::new(path, content.render()?));
        }

        let mut links = BTreeMap::new();
        for (name, targets) in instance.links() {
            let qualified = targets
                .iter()
                .map(|t| ctx.endpoint(t).map(|l| l.qualified_name()))
                .collect::<ElkformResult<Vec<_>>>()?;
            links.insert(name.clone(), qualified);
        }

        Ok(InstanceRecord {
            name: instance.name().to_string(),
            role: instance.role(),
            host: instance.host().clone(),
            address: host.address().to_string(),
            image: instance.image().clone(),
            memory: instance.memory(),
            endpoints: instance.endpoints().clone(),
            links,
            volumes: instance.volumes().to_vec(),
            env: instance.env().clone(),
            artifacts,
        })
    }
}
