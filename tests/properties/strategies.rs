//! Shared generators.

use proptest::prelude::*;

use elkform::Host;

const GIB: u64 = 1 << 30;

/// 1..=max hosts with unique ids spread over up to four partitions
pub fn hosts(max: usize) -> impl Strategy<Value = Vec<Host>> {
    proptest::collection::vec((0u8..4, 1u64..=16), 1..=max).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (partition, gib))| {
                Host::new(
                    format!("h{}", idx),
                    format!("10.0.{}.{}", partition, idx + 1),
                    format!("dc{}", partition),
                    gib * GIB,
                )
            })
            .collect()
    })
}

pub fn distinct_partitions(hosts: &[Host]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for host in hosts {
        if !seen.contains(&host.partition()) {
            seen.push(host.partition());
        }
    }
    seen.len()
}
