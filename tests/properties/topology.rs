//! Property tests for assembled topologies.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use elkform::domain::ports::NoTemplates;
use elkform::{AssemblyOptions, AssemblyPipeline, ClusterTopology, Host, PortPool, Role};

use super::strategies::hosts;

fn assemble(hosts: Vec<Host>) -> ClusterTopology {
    let options =
        AssemblyOptions::new("prop").with_port_pool(PortPool::new(20000, 20100).unwrap());
    AssemblyPipeline::new(hosts, Arc::new(NoTemplates))
        .assemble(&options)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Search nodes form a full mesh without self links.
    #[test]
    fn property_search_mesh_is_complete(hosts in hosts(7)) {
        let n = hosts.len();
        let topology = assemble(hosts);

        let entries: usize = topology
            .instances_with_role(Role::SearchNode)
            .map(|i| i.links.get("peer").map_or(0, Vec::len))
            .sum();
        prop_assert_eq!(entries, n * (n - 1));
        for node in topology.instances_with_role(Role::SearchNode) {
            let own = format!("{}/", node.name);
            prop_assert!(node.links.get("peer").into_iter().flatten().all(|t| !t.starts_with(&own)));
        }
    }

    /// PROPERTY: External ports are unique; pooled ports come from the pool.
    #[test]
    fn property_external_ports_are_unique(hosts in hosts(7)) {
        let topology = assemble(hosts);
        let mut seen = BTreeSet::new();

        for instance in &topology.instances {
            for (name, endpoint) in &instance.endpoints {
                if !endpoint.is_exposed() {
                    prop_assert!(endpoint.external_port().is_none());
                    continue;
                }
                let port = endpoint.external_port().unwrap();
                prop_assert!(seen.insert(port), "port {} reused by {}/{}", port, instance.name, name);
                if endpoint.requested_port().is_none() {
                    prop_assert!((topology.port_pool.low()..=topology.port_pool.high()).contains(&port));
                }
            }
        }
    }

    /// PROPERTY: Assembly is a pure function of its inputs.
    #[test]
    fn property_assembly_is_deterministic(hosts in hosts(6)) {
        let first = assemble(hosts.clone());
        let second = assemble(hosts);
        prop_assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: A written topology reads back unchanged.
    #[test]
    fn property_topology_json_round_trips(hosts in hosts(4)) {
        let topology = assemble(hosts);
        let parsed = ClusterTopology::from_json(&topology.to_json().unwrap()).unwrap();
        prop_assert_eq!(parsed, topology);
    }
}
