//! Property tests for quorum election.

use proptest::prelude::*;

use elkform::domain::services::QuorumSelector;

use super::strategies::{distinct_partitions, hosts};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The quorum always has odd size and unique members.
    #[test]
    fn property_quorum_is_odd_and_unique(hosts in hosts(9)) {
        let quorum = QuorumSelector::select(&hosts).unwrap();

        prop_assert_eq!(quorum.len() % 2, 1);
        let mut sorted = quorum.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), quorum.len());
        prop_assert!(quorum.iter().all(|id| hosts.iter().any(|h| h.id() == id)));
    }

    /// PROPERTY: The quorum is one host per partition, adjusted by at most one.
    #[test]
    fn property_quorum_tracks_partition_count(hosts in hosts(9)) {
        let quorum = QuorumSelector::select(&hosts).unwrap();
        let partitions = distinct_partitions(&hosts);

        if partitions % 2 == 1 {
            prop_assert_eq!(quorum.len(), partitions);
        } else if hosts.len() > partitions {
            prop_assert_eq!(quorum.len(), partitions + 1);
        } else {
            prop_assert_eq!(quorum.len(), partitions - 1);
        }
    }

    /// PROPERTY: Every partition's first host is elected when the count is odd.
    #[test]
    fn property_first_host_of_each_partition_leads(hosts in hosts(9)) {
        let quorum = QuorumSelector::select(&hosts).unwrap();
        prop_assert_eq!(&quorum[0], hosts[0].id());
    }
}
