//! External port allocation
//!
//! Explicit requests are committed first, then every other exposed endpoint
//! takes the lowest free pool port in declaration order (instance order,
//! then endpoint name). Nothing is written to the builder until the whole
//! assignment is known to succeed.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::TopologyBuilder;
use crate::domain::value_objects::{qualified_endpoint, EndpointRef, InstanceId};
use crate::error::{ElkformError, ElkformResult};

/// Counts of a completed allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortAssignment {
    pub explicit: usize,
    pub pooled: usize,
}

struct Exposed {
    target: EndpointRef,
    key: String,
    request: Option<u16>,
}

/// Assigns external ports to exposed endpoints
#[derive(Debug, Clone, Default)]
pub struct PortAllocator {
    /// Explicit ports keyed by `<instance>/<endpoint>`
    explicit: BTreeMap<String, u16>,
}

impl PortAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit requests; these win over ports declared on the endpoint
    pub fn with_explicit(mut self, explicit: BTreeMap<String, u16>) -> Self {
        self.explicit = explicit;
        self
    }

    pub fn allocate(&self, builder: &mut TopologyBuilder) -> ElkformResult<PortAssignment> {
        let exposed = self.collect_exposed(builder)?;

        let mut used: BTreeMap<u16, &str> = BTreeMap::new();
        let mut plan: Vec<(&EndpointRef, u16)> = Vec::with_capacity(exposed.len());
        for entry in &exposed {
            let Some(port) = entry.request else {
                continue;
            };
            if let Some(first) = used.insert(port, &entry.key) {
                return Err(ElkformError::PortConflict {
                    port,
                    first: first.to_string(),
                    second: entry.key.clone(),
                });
            }
            plan.push((&entry.target, port));
        }
        let explicit = plan.len();

        let waiting: Vec<&Exposed> = exposed.iter().filter(|e| e.request.is_none()).collect();
        let pool = builder.pool();
        let taken: BTreeSet<u16> = used.keys().copied().collect();
        let free: Vec<u16> = pool.iter().filter(|p| !taken.contains(p)).collect();
        if free.len() < waiting.len() {
            return Err(ElkformError::PortPoolExhausted {
                needed: waiting.len(),
                available: free.len(),
                low: pool.low(),
                high: pool.high(),
            });
        }
        plan.extend(waiting.iter().map(|e| &e.target).zip(free));

        for (target, port) in &plan {
            builder.assign_external_port(target, *port)?;
        }

        Ok(PortAssignment {
            explicit,
            pooled: plan.len() - explicit,
        })
    }

    /// Exposed endpoints in allocation order, with their effective request
    fn collect_exposed(&self, builder: &TopologyBuilder) -> ElkformResult<Vec<Exposed>> {
        let mut exposed = Vec::new();
        for (idx, instance) in builder.instances().iter().enumerate() {
            for (name, endpoint) in instance.endpoints() {
                if !endpoint.is_exposed() {
                    continue;
                }
                let key = qualified_endpoint(instance.name(), name);
                let request = self
                    .explicit
                    .get(&key)
                    .copied()
                    .or(endpoint.requested_port());
                exposed.push(Exposed {
                    target: EndpointRef::new(InstanceId::new(idx), name.clone()),
                    key,
                    request,
                });
            }
        }

        if let Some(unknown) = self
            .explicit
            .keys()
            .find(|key| !exposed.iter().any(|e| &e.key == *key))
        {
            return Err(ElkformError::UnknownPortRequest {
                key: unknown.clone(),
            });
        }
        Ok(exposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Endpoint, Host, Protocol, ServiceInstance};
    use crate::domain::value_objects::{HostId, ImageRef, PortPool, Role};

    fn builder(low: u16, high: u16) -> TopologyBuilder {
        let mut builder = TopologyBuilder::new(
            "logs",
            vec![Host::new("node1", "10.0.0.1", "dc1", 1 << 33)],
            vec![HostId::new("node1")],
            PortPool::new(low, high).unwrap(),
        );
        for name in ["a", "b", "c"] {
            builder.add_instance(
                ServiceInstance::new(
                    name,
                    Role::SearchNode,
                    HostId::new("node1"),
                    ImageRef::new("es", "1"),
                    0,
                )
                .with_endpoint("http", Endpoint::exposed(Protocol::Http, 9200))
                .with_endpoint("https", Endpoint::exposed(Protocol::Https, 9443))
                .with_endpoint("peer", Endpoint::internal(Protocol::Tcp, 9300)),
            );
        }
        builder
    }

    fn ports(builder: &TopologyBuilder) -> Vec<(String, u16)> {
        builder
            .instances()
            .iter()
            .flat_map(|i| {
                i.endpoints().iter().filter_map(move |(name, e)| {
                    e.external_port()
                        .map(|p| (qualified_endpoint(i.name(), name), p))
                })
            })
            .collect()
    }

    fn explicit(pairs: &[(&str, u16)]) -> BTreeMap<String, u16> {
        pairs.iter().map(|(k, p)| (k.to_string(), *p)).collect()
    }

    #[test]
    fn explicit_requests_win_and_pool_fills_the_rest() {
        let mut builder = builder(5000, 5010);
        let assignment = PortAllocator::new()
            .with_explicit(explicit(&[("a/http", 5000), ("b/http", 5001)]))
            .allocate(&mut builder)
            .unwrap();

        assert_eq!(assignment, PortAssignment { explicit: 2, pooled: 4 });
        assert_eq!(
            ports(&builder),
            vec![
                ("a/http".to_string(), 5000),
                ("a/https".to_string(), 5002),
                ("b/http".to_string(), 5001),
                ("b/https".to_string(), 5003),
                ("c/http".to_string(), 5004),
                ("c/https".to_string(), 5005),
            ]
        );
    }

    #[test]
    fn conflicting_requests_fail() {
        let mut builder = builder(5000, 5010);
        let err = PortAllocator::new()
            .with_explicit(explicit(&[("a/http", 5005), ("c/http", 5005)]))
            .allocate(&mut builder)
            .unwrap_err();
        assert!(matches!(
            err,
            ElkformError::PortConflict { port: 5005, ref first, ref second }
                if first == "a/http" && second == "c/http"
        ));
        assert!(ports(&builder).is_empty());
    }

    #[test]
    fn explicit_ports_outside_pool_do_not_consume_slots() {
        let mut builder = builder(5000, 5004);
        let assignment = PortAllocator::new()
            .with_explicit(explicit(&[("a/http", 80)]))
            .allocate(&mut builder)
            .unwrap();
        assert_eq!(assignment.pooled, 5);
        assert_eq!(ports(&builder)[0], ("a/http".to_string(), 80));
    }

    #[test]
    fn exhausted_pool_fails_before_assigning() {
        let mut builder = builder(5000, 5003);
        let err = PortAllocator::new()
            .with_explicit(explicit(&[("a/http", 5000)]))
            .allocate(&mut builder)
            .unwrap_err();
        assert!(matches!(
            err,
            ElkformError::PortPoolExhausted { needed: 5, available: 3, .. }
        ));
        assert!(ports(&builder).is_empty());
    }

    #[test]
    fn unknown_explicit_key_is_rejected() {
        let mut builder = builder(5000, 5010);
        let err = PortAllocator::new()
            .with_explicit(explicit(&[("a/peer", 5000)]))
            .allocate(&mut builder)
            .unwrap_err();
        assert!(matches!(err, ElkformError::UnknownPortRequest { ref key } if key == "a/peer"));
    }

    #[test]
    fn allocation_is_deterministic() {
        let mut first = builder(5000, 5010);
        let mut second = builder(5000, 5010);
        PortAllocator::new().allocate(&mut first).unwrap();
        PortAllocator::new().allocate(&mut second).unwrap();
        assert_eq!(ports(&first), ports(&second));
    }
}
