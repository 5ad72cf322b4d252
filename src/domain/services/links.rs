//! Link graph wiring ("clusterization")
//!
//! Three passes over the builder, always in this order: peer mesh, ensemble
//! clients, upstream. Each pass declares links with
//! [`TopologyBuilder::set_link`], which replaces any earlier value of the
//! same name.

use crate::domain::entities::TopologyBuilder;
use crate::domain::services::factory::{dashboard, ensemble_node, proxy, search_node};
use crate::domain::value_objects::{EndpointRef, InstanceId, Role};
use crate::error::ElkformResult;

/// Stateless link wiring service
pub struct LinkGraph;

impl LinkGraph {
    /// Run all three passes, returning the number of link entries written
    pub fn wire(builder: &mut TopologyBuilder) -> ElkformResult<usize> {
        let mut entries = Self::link_peers(builder)?;
        entries += Self::link_ensemble_clients(builder)?;
        entries += Self::link_upstream(builder)?;
        Ok(entries)
    }

    /// Full mesh between search nodes, self excluded
    ///
    /// N search nodes yield N·(N−1) directed entries. A lone node still gets
    /// an empty `peer` link so its configuration can read it.
    pub fn link_peers(builder: &mut TopologyBuilder) -> ElkformResult<usize> {
        let nodes = builder.ids_with_role(Role::SearchNode);
        let mut entries = 0;
        for &owner in &nodes {
            let targets: Vec<EndpointRef> = nodes
                .iter()
                .filter(|&&other| other != owner)
                .map(|&other| EndpointRef::new(other, search_node::PEER))
                .collect();
            entries += targets.len();
            builder.set_link(owner, search_node::PEER_LINK, targets)?;
        }
        Ok(entries)
    }

    /// Point search nodes at the ensemble and the dashboard at the search
    /// nodes
    ///
    /// Ensemble clients are listed in quorum order. The dashboard link set
    /// here is provisional; [`LinkGraph::link_upstream`] moves it onto the
    /// proxy.
    pub fn link_ensemble_clients(builder: &mut TopologyBuilder) -> ElkformResult<usize> {
        let clients: Vec<EndpointRef> = Self::ensemble_in_quorum_order(builder)
            .into_iter()
            .map(|id| EndpointRef::new(id, ensemble_node::CLIENT))
            .collect();
        let search_http: Vec<EndpointRef> = builder
            .ids_with_role(Role::SearchNode)
            .into_iter()
            .map(|id| EndpointRef::new(id, search_node::HTTP))
            .collect();

        let mut entries = 0;
        for owner in builder.ids_with_role(Role::SearchNode) {
            entries += clients.len();
            builder.set_link(owner, search_node::ENSEMBLE_LINK, clients.clone())?;
        }
        for owner in builder.ids_with_role(Role::Dashboard) {
            entries += search_http.len();
            builder.set_link(owner, dashboard::ELASTICSEARCH_LINK, search_http.clone())?;
        }
        Ok(entries)
    }

    /// Funnel external traffic through the proxy
    ///
    /// The proxy's `upstream` link collects every search node `http`
    /// endpoint and then every dashboard `http` endpoint. Each dashboard's
    /// `elasticsearch` link is then re-declared onto the proxy's
    /// `elasticsearch.*` endpoints. Without a proxy nothing changes.
    pub fn link_upstream(builder: &mut TopologyBuilder) -> ElkformResult<usize> {
        let proxies = builder.ids_with_role(Role::Proxy);
        let Some(&gateway) = proxies.first() else {
            return Ok(0);
        };

        let upstream: Vec<EndpointRef> = builder
            .ids_with_role(Role::SearchNode)
            .into_iter()
            .map(|id| EndpointRef::new(id, search_node::HTTP))
            .chain(
                builder
                    .ids_with_role(Role::Dashboard)
                    .into_iter()
                    .map(|id| EndpointRef::new(id, dashboard::HTTP)),
            )
            .collect();

        let mut entries = 0;
        for owner in proxies {
            entries += upstream.len();
            builder.set_link(owner, proxy::UPSTREAM_LINK, upstream.clone())?;
        }

        let via_proxy = vec![
            EndpointRef::new(gateway, proxy::ELASTICSEARCH_HTTP),
            EndpointRef::new(gateway, proxy::ELASTICSEARCH_HTTPS),
        ];
        for owner in builder.ids_with_role(Role::Dashboard) {
            builder.set_link(owner, dashboard::ELASTICSEARCH_LINK, via_proxy.clone())?;
        }
        Ok(entries)
    }

    fn ensemble_in_quorum_order(builder: &TopologyBuilder) -> Vec<InstanceId> {
        let ensemble = builder.ids_with_role(Role::EnsembleNode);
        builder
            .quorum()
            .iter()
            .filter_map(|host| {
                ensemble
                    .iter()
                    .copied()
                    .find(|&id| builder.instance(id).is_some_and(|i| i.host() == host))
            })
            .collect()
    }
}
