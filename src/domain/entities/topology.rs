//! Topology entities - the two phases of a cluster under construction
//!
//! [`TopologyBuilder`] is the mutable phase: instances are added to an
//! arena, links are declared (and may be re-declared), and external ports
//! are assigned. [`TopologyBuilder::freeze`] validates the structure and
//! yields a [`FrozenTopology`], which has no mutators at all. Deferred
//! artifacts only ever see the frozen value.

use std::collections::BTreeMap;

use crate::domain::entities::{Endpoint, Host, ServiceInstance};
use crate::domain::value_objects::{
    qualified_endpoint, EndpointRef, HostId, InstanceId, PortPool, Role,
};
use crate::error::{ElkformError, ElkformResult};

/// Shared arena state of both phases
#[derive(Debug, Clone)]
struct Arena {
    cluster_name: String,
    hosts: Vec<Host>,
    quorum: Vec<HostId>,
    pool: PortPool,
    instances: Vec<ServiceInstance>,
}

impl Arena {
    fn instance(&self, id: InstanceId) -> Option<&ServiceInstance> {
        self.instances.get(id.index())
    }

    fn endpoint(&self, target: &EndpointRef) -> Option<(&ServiceInstance, &Endpoint)> {
        let instance = self.instance(target.instance)?;
        let endpoint = instance.endpoint(&target.endpoint)?;
        Some((instance, endpoint))
    }

    fn missing_endpoint(&self, target: &EndpointRef) -> ElkformError {
        ElkformError::MissingEndpoint {
            instance: self
                .instance(target.instance)
                .map(|i| i.name().to_string())
                .unwrap_or_else(|| target.instance.to_string()),
            endpoint: target.endpoint.clone(),
        }
    }

    fn ids_with_role(&self, role: Role) -> Vec<InstanceId> {
        self.instances
            .iter()
            .enumerate()
            .filter(|(_, i)| i.role() == role)
            .map(|(idx, _)| InstanceId::new(idx))
            .collect()
    }
}

/// Mutable topology used during the build phases
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    arena: Arena,
}

impl TopologyBuilder {
    pub fn new(
        cluster_name: impl Into<String>,
        hosts: Vec<Host>,
        quorum: Vec<HostId>,
        pool: PortPool,
    ) -> Self {
        Self {
            arena: Arena {
                cluster_name: cluster_name.into(),
                hosts,
                quorum,
                pool,
                instances: Vec::new(),
            },
        }
    }

    /// Append an instance; ids follow declaration order
    pub fn add_instance(&mut self, instance: ServiceInstance) -> InstanceId {
        self.arena.instances.push(instance);
        InstanceId::new(self.arena.instances.len() - 1)
    }

    pub fn cluster_name(&self) -> &str {
        &self.arena.cluster_name
    }

    pub fn hosts(&self) -> &[Host] {
        &self.arena.hosts
    }

    pub fn quorum(&self) -> &[HostId] {
        &self.arena.quorum
    }

    pub fn pool(&self) -> PortPool {
        self.arena.pool
    }

    pub fn instances(&self) -> &[ServiceInstance] {
        &self.arena.instances
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ServiceInstance> {
        self.arena.instance(id)
    }

    pub fn ids_with_role(&self, role: Role) -> Vec<InstanceId> {
        self.arena.ids_with_role(role)
    }

    /// Declare (or re-declare) a link. Every target must already exist.
    pub fn set_link(
        &mut self,
        owner: InstanceId,
        name: &str,
        targets: Vec<EndpointRef>,
    ) -> ElkformResult<()> {
        if let Some(missing) = targets.iter().find(|t| self.arena.endpoint(t).is_none()) {
            return Err(self.arena.missing_endpoint(missing));
        }
        let instance = self
            .arena
            .instances
            .get_mut(owner.index())
            .ok_or_else(|| ElkformError::MissingEndpoint {
                instance: owner.to_string(),
                endpoint: name.to_string(),
            })?;
        instance.set_link(name, targets);
        Ok(())
    }

    /// Assign an external port to an endpoint (write-once)
    pub fn assign_external_port(&mut self, target: &EndpointRef, port: u16) -> ElkformResult<()> {
        let missing = self.arena.missing_endpoint(target);
        let instance = self
            .arena
            .instances
            .get_mut(target.instance.index())
            .ok_or(missing)?;
        let key = qualified_endpoint(instance.name(), &target.endpoint);
        let endpoint = match instance.endpoint_mut(&target.endpoint) {
            Some(endpoint) => endpoint,
            None => {
                return Err(ElkformError::MissingEndpoint {
                    instance: instance.name().to_string(),
                    endpoint: target.endpoint.clone(),
                })
            }
        };
        endpoint
            .assign_external(port)
            .map_err(|current| ElkformError::PortAlreadyAssigned {
                endpoint: key,
                current,
            })
    }

    /// Validate the structure and make it immutable
    ///
    /// Checks that every instance sits on a known host, that every link
    /// target exists, that every exposed endpoint has an external port, and
    /// that no external port is used twice.
    pub fn freeze(self) -> ElkformResult<FrozenTopology> {
        let arena = self.arena;
        let mut used: BTreeMap<u16, String> = BTreeMap::new();

        for instance in &arena.instances {
            if !arena.hosts.iter().any(|h| h.id() == instance.host()) {
                return Err(ElkformError::UnknownHost {
                    instance: instance.name().to_string(),
                    host: instance.host().to_string(),
                });
            }

            for targets in instance.links().values() {
                if let Some(missing) = targets.iter().find(|t| arena.endpoint(t).is_none()) {
                    return Err(arena.missing_endpoint(missing));
                }
            }

            for (name, endpoint) in instance.endpoints() {
                if !endpoint.is_exposed() {
                    continue;
                }
                let key = qualified_endpoint(instance.name(), name);
                let port = endpoint
                    .external_port()
                    .ok_or_else(|| ElkformError::UnallocatedPort {
                        endpoint: key.clone(),
                    })?;
                if let Some(first) = used.insert(port, key.clone()) {
                    return Err(ElkformError::DuplicateExternalPort {
                        port,
                        first,
                        second: key,
                    });
                }
            }
        }

        Ok(FrozenTopology { arena })
    }
}

/// Immutable topology handed to deferred resolution
#[derive(Debug, Clone)]
pub struct FrozenTopology {
    arena: Arena,
}

impl FrozenTopology {
    pub fn cluster_name(&self) -> &str {
        &self.arena.cluster_name
    }

    pub fn hosts(&self) -> &[Host] {
        &self.arena.hosts
    }

    pub fn host(&self, id: &HostId) -> Option<&Host> {
        self.arena.hosts.iter().find(|h| h.id() == id)
    }

    pub fn quorum(&self) -> &[HostId] {
        &self.arena.quorum
    }

    pub fn pool(&self) -> PortPool {
        self.arena.pool
    }

    pub fn instances(&self) -> &[ServiceInstance] {
        &self.arena.instances
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ServiceInstance> {
        self.arena.instance(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = InstanceId> {
        (0..self.arena.instances.len()).map(InstanceId::new)
    }

    pub fn ids_with_role(&self, role: Role) -> Vec<InstanceId> {
        self.arena.ids_with_role(role)
    }

    pub fn endpoint(&self, target: &EndpointRef) -> Option<(&ServiceInstance, &Endpoint)> {
        self.arena.endpoint(target)
    }

    /// Total number of directed link entries across all instances
    pub fn link_entry_count(&self) -> usize {
        self.arena
            .instances
            .iter()
            .flat_map(|i| i.links().values())
            .map(Vec::len)
            .sum()
    }
}
