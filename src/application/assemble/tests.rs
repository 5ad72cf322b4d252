//! Assembly Pipeline Tests

use super::*;
use crate::domain::entities::Host;
use crate::domain::policies::GIB;
use crate::domain::ports::{AssemblyEvent, AssemblyEventSink, NoTemplates, TemplateSource};
use crate::domain::value_objects::{PortPool, Role};
use crate::error::ElkformError;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingEventSink {
    events: Mutex<Vec<AssemblyEvent>>,
}

impl RecordingEventSink {
    fn events(&self) -> Vec<AssemblyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AssemblyEventSink for RecordingEventSink {
    fn on_event(&self, event: AssemblyEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn hosts() -> Vec<Host> {
    vec![
        Host::new("node1", "10.0.0.1", "dc1", 8 * GIB),
        Host::new("node2", "10.0.0.2", "dc1", 8 * GIB),
        Host::new("node3", "10.0.1.1", "dc2", 8 * GIB),
    ]
}

fn pipeline(hosts: Vec<Host>) -> AssemblyPipeline<Vec<Host>> {
    AssemblyPipeline::new(hosts, Arc::new(NoTemplates))
}

fn options() -> AssemblyOptions {
    AssemblyOptions::new("logs").with_port_pool(PortPool::new(5000, 5010).unwrap())
}

#[test]
fn three_hosts_two_partitions_end_to_end() {
    let topology = pipeline(hosts()).assemble(&options()).unwrap();

    let quorum: Vec<&str> = topology.quorum.iter().map(|h| h.as_str()).collect();
    assert_eq!(quorum, vec!["node1", "node3", "node2"]);

    let names: Vec<&str> = topology.instances.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "zookeeper-node1",
            "zookeeper-node3",
            "zookeeper-node2",
            "elasticsearch-node1",
            "elasticsearch-node2",
            "elasticsearch-node3",
            "nginx-elk-node1",
            "kibana-node1",
        ]
    );

    let peer_entries: usize = topology
        .instances_with_role(Role::SearchNode)
        .map(|i| i.links["peer"].len())
        .sum();
    assert_eq!(peer_entries, 6);
    for node in topology.instances_with_role(Role::SearchNode) {
        assert!(node.links["peer"]
            .iter()
            .all(|target| !target.starts_with(&format!("{}/", node.name))));
    }
}

#[test]
fn dashboard_reaches_elasticsearch_through_proxy() {
    let topology = pipeline(hosts()).assemble(&options()).unwrap();

    let proxy = topology.instance("nginx-elk-node1").unwrap();
    let published = proxy.published_address("elasticsearch.http").unwrap();
    let dashboard = topology.instance("kibana-node1").unwrap();

    assert_eq!(
        dashboard.links["elasticsearch"],
        vec![
            "nginx-elk-node1/elasticsearch.http".to_string(),
            "nginx-elk-node1/elasticsearch.https".to_string(),
        ]
    );
    assert!(dashboard.artifacts["config.js"]
        .content
        .contains(&format!("elasticsearch: \"http://{}\"", published)));
}

#[test]
fn gateway_ports_are_explicit_and_the_rest_pooled() {
    let topology = pipeline(hosts()).assemble(&options()).unwrap();

    let proxy = topology.instance("nginx-elk-node1").unwrap();
    assert_eq!(proxy.endpoints["kibana.http"].external_port(), Some(80));
    assert_eq!(proxy.endpoints["kibana.https"].external_port(), Some(443));

    let pooled: Vec<u16> = topology
        .instances
        .iter()
        .flat_map(|i| i.endpoints.values())
        .filter_map(|e| e.external_port())
        .filter(|p| (5000..=5010).contains(p))
        .collect();
    assert_eq!(pooled, vec![5000, 5001, 5002, 5003, 5004, 5005]);
}

#[test]
fn zookeeper_ids_follow_quorum_order() {
    let topology = pipeline(hosts()).assemble(&options()).unwrap();

    let node3 = topology.instance("zookeeper-node3").unwrap();
    assert_eq!(node3.artifacts["myid"].content, "2\n");
    let zoo_cfg = &node3.artifacts["zoo.cfg"].content;
    assert!(zoo_cfg.contains("server.1=10.0.0.1:2888:3888\n"));
    assert!(zoo_cfg.contains("server.2=10.0.1.1:2888:3888\n"));
    assert!(zoo_cfg.contains("server.3=10.0.0.2:2888:3888\n"));
}

#[test]
fn events_follow_phase_order() {
    let sink = Arc::new(RecordingEventSink::default());
    let topology = pipeline(hosts())
        .assemble_with_events(&options(), sink.clone())
        .unwrap();

    let events = sink.events();
    assert_eq!(
        events.first(),
        Some(&AssemblyEvent::Started {
            cluster: "logs".to_string(),
            host_count: 3,
        })
    );
    assert_eq!(
        events.last(),
        Some(&AssemblyEvent::Completed {
            instance_count: 8,
            artifact_count: topology.artifact_count(),
        })
    );
    assert!(events.contains(&AssemblyEvent::PortsAllocated {
        explicit: 2,
        pooled: 6,
    }));
    let resolved = events
        .iter()
        .filter(|e| matches!(e, AssemblyEvent::ArtifactResolved { .. }))
        .count();
    assert_eq!(resolved, topology.artifact_count());
}

#[test]
fn failure_emits_no_artifacts() {
    let sink = Arc::new(RecordingEventSink::default());
    let options = AssemblyOptions::new("logs").with_port_pool(PortPool::new(5000, 5002).unwrap());
    let err = pipeline(hosts())
        .assemble_with_events(&options, sink.clone())
        .unwrap_err();

    assert!(matches!(
        err,
        ElkformError::PortPoolExhausted { needed: 6, available: 3, .. }
    ));
    assert!(!sink.events().iter().any(|e| matches!(
        e,
        AssemblyEvent::ArtifactResolved { .. } | AssemblyEvent::Completed { .. }
    )));
}

#[test]
fn empty_inventory_fails() {
    let err = pipeline(Vec::new()).assemble(&options()).unwrap_err();
    assert!(matches!(err, ElkformError::EmptyHostSet));
}

#[test]
fn duplicate_host_ids_fail() {
    let mut hosts = hosts();
    hosts.push(Host::new("node2", "10.0.0.9", "dc3", GIB));
    let err = pipeline(hosts).assemble(&options()).unwrap_err();
    assert!(matches!(err, ElkformError::DuplicateHost { ref id } if id == "node2"));
}

#[test]
fn identical_inputs_yield_identical_topologies() {
    let first = pipeline(hosts()).assemble(&options()).unwrap();
    let second = pipeline(hosts()).assemble(&options()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn templates_override_rendered_artifacts() {
    struct SiteTemplate;

    impl TemplateSource for SiteTemplate {
        fn template(&self, name: &str) -> Option<String> {
            (name == "myid").then(|| "id=${myid} cluster=${cluster}\n".to_string())
        }
    }

    let topology = AssemblyPipeline::new(hosts(), Arc::new(SiteTemplate))
        .assemble(&options())
        .unwrap();
    assert_eq!(
        topology.instance("zookeeper-node2").unwrap().artifacts["myid"].content,
        "id=3 cluster=logs\n"
    );
}

#[test]
fn certificate_template_is_rendered_into_cert_dir() {
    struct CertTemplate;

    impl TemplateSource for CertTemplate {
        fn template(&self, name: &str) -> Option<String> {
            (name == "server.pem").then(|| "# ${host} ${address}\n".to_string())
        }
    }

    let topology = AssemblyPipeline::new(hosts(), Arc::new(CertTemplate))
        .assemble(&options())
        .unwrap();
    let cert = &topology.instance("nginx-elk-node1").unwrap().artifacts["server.pem"];
    assert_eq!(cert.path, "/etc/nginx/certs/server.pem");
    assert_eq!(cert.content, "# node1 10.0.0.1\n");
}
