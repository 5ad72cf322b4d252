//! Assembly Pipeline
//!
//! Fixed phase order:
//! 1. Elect the quorum
//! 2. Instantiate services and place them on hosts
//! 3. Wire links
//! 4. Allocate external ports
//! 5. Freeze and resolve deferred artifacts
//!
//! Each phase only adds to what the previous ones built. The first error
//! aborts the run and nothing partial is returned.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, info_span};

use crate::domain::entities::{ClusterTopology, Host, ServiceInstance, TopologyBuilder};
use crate::domain::ports::{
    AssemblyEvent, AssemblyEventSink, HostInventory, NoopEventSink, TemplateSource,
};
use crate::domain::services::{
    DeferredConfigResolver, LinkGraph, PortAllocator, QuorumSelector, ServiceInstanceFactory,
};
use crate::domain::value_objects::{HostId, Role};
use crate::error::{ElkformError, ElkformResult};

use super::options::AssemblyOptions;

/// Assembly use case, parameterized by its host inventory
pub struct AssemblyPipeline<HI>
where
    HI: HostInventory,
{
    inventory: HI,
    templates: Arc<dyn TemplateSource>,
}

impl<HI> AssemblyPipeline<HI>
where
    HI: HostInventory,
{
    pub fn new(inventory: HI, templates: Arc<dyn TemplateSource>) -> Self {
        Self {
            inventory,
            templates,
        }
    }

    /// Assemble silently
    pub fn assemble(&self, options: &AssemblyOptions) -> ElkformResult<ClusterTopology> {
        self.assemble_with_events(options, Arc::new(NoopEventSink))
    }

    /// Assemble, reporting progress to `events`
    pub fn assemble_with_events(
        &self,
        options: &AssemblyOptions,
        events: Arc<dyn AssemblyEventSink>,
    ) -> ElkformResult<ClusterTopology> {
        let hosts = self.inventory.load_hosts()?;
        reject_duplicate_hosts(&hosts)?;

        let _run = info_span!("assemble", cluster = options.cluster_name()).entered();
        info!(hosts = hosts.len(), "assembling topology");
        events.on_event(AssemblyEvent::Started {
            cluster: options.cluster_name().to_string(),
            host_count: hosts.len(),
        });

        let quorum = {
            let _span = info_span!("elect_quorum").entered();
            QuorumSelector::select(&hosts)?
        };
        debug!(members = ?quorum, "quorum elected");
        events.on_event(AssemblyEvent::QuorumElected {
            members: quorum.iter().map(HostId::to_string).collect(),
        });

        let instances = {
            let _span = info_span!("place_instances").entered();
            self.place(&hosts, &quorum, options)?
        };
        let mut builder = TopologyBuilder::new(
            options.cluster_name(),
            hosts,
            quorum,
            options.port_pool,
        );
        for instance in instances {
            builder.add_instance(instance);
        }
        debug!(instances = builder.instances().len(), "instances placed");
        events.on_event(AssemblyEvent::InstancesPlaced {
            instance_count: builder.instances().len(),
        });

        let link_entries = {
            let _span = info_span!("wire_links").entered();
            LinkGraph::wire(&mut builder)?
        };
        events.on_event(AssemblyEvent::LinksWired { link_entries });

        let assignment = {
            let _span = info_span!("allocate_ports", pool = %options.port_pool).entered();
            PortAllocator::new()
                .with_explicit(options.explicit_ports.clone())
                .allocate(&mut builder)?
        };
        debug!(
            explicit = assignment.explicit,
            pooled = assignment.pooled,
            "ports allocated"
        );
        events.on_event(AssemblyEvent::PortsAllocated {
            explicit: assignment.explicit,
            pooled: assignment.pooled,
        });

        let frozen = builder.freeze()?;
        let deferred_count = frozen
            .instances()
            .iter()
            .flat_map(|i| i.artifacts().values())
            .filter(|a| a.is_deferred())
            .count();
        events.on_event(AssemblyEvent::Frozen { deferred_count });

        let topology = {
            let _span = info_span!("resolve_artifacts", deferred = deferred_count).entered();
            DeferredConfigResolver::new(self.templates.as_ref()).resolve(&frozen, events.as_ref())?
        };

        info!(
            instances = topology.instances.len(),
            artifacts = topology.artifact_count(),
            "topology assembled"
        );
        events.on_event(AssemblyEvent::Completed {
            instance_count: topology.instances.len(),
            artifact_count: topology.artifact_count(),
        });
        Ok(topology)
    }

    /// Instances in declaration order: ensemble nodes on quorum hosts,
    /// search nodes on every host, then proxy and dashboard on the first
    /// host
    fn place(
        &self,
        hosts: &[Host],
        quorum: &[HostId],
        options: &AssemblyOptions,
    ) -> ElkformResult<Vec<ServiceInstance>> {
        let factory = ServiceInstanceFactory::new(options.settings.clone())
            .with_templates(Arc::clone(&self.templates));
        let gateway = hosts.first().ok_or(ElkformError::EmptyHostSet)?;

        let mut instances = Vec::with_capacity(quorum.len() + hosts.len() + 2);
        for member in quorum {
            let host = hosts
                .iter()
                .find(|h| h.id() == member)
                .ok_or_else(|| ElkformError::UnknownHost {
                    instance: format!("{}-{}", Role::EnsembleNode.service_name(), member),
                    host: member.to_string(),
                })?;
            instances.push(factory.build(host, Role::EnsembleNode));
        }
        for host in hosts {
            instances.push(factory.build(host, Role::SearchNode));
        }
        instances.push(factory.build(gateway, Role::Proxy));
        instances.push(factory.build(gateway, Role::Dashboard));
        Ok(instances)
    }
}

fn reject_duplicate_hosts(hosts: &[Host]) -> ElkformResult<()> {
    let mut seen = BTreeSet::new();
    for host in hosts {
        if !seen.insert(host.id()) {
            return Err(ElkformError::DuplicateHost {
                id: host.id().to_string(),
            });
        }
    }
    Ok(())
}
