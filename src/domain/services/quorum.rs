//! Quorum selection service
//!
//! Elects the hosts that run the coordination ensemble. One representative
//! per partition spreads the ensemble across fault zones; the membership is
//! then forced to odd size so a strict majority always exists.

use crate::domain::entities::Host;
use crate::domain::value_objects::HostId;
use crate::error::{ElkformError, ElkformResult};

/// Pure quorum selection service
pub struct QuorumSelector;

impl QuorumSelector {
    /// Elect the ensemble members from an ordered host sequence
    ///
    /// Partitions are visited in first-seen order and the first host of each
    /// is selected. If that yields an even count, the first host of the
    /// original sequence not yet selected is appended. When every host is
    /// already a representative there is no spare, so the last representative
    /// is dropped instead.
    pub fn select(hosts: &[Host]) -> ElkformResult<Vec<HostId>> {
        if hosts.is_empty() {
            return Err(ElkformError::EmptyHostSet);
        }

        let mut partitions: Vec<&str> = Vec::new();
        let mut selected: Vec<&Host> = Vec::new();
        for host in hosts {
            if !partitions.contains(&host.partition()) {
                partitions.push(host.partition());
                selected.push(host);
            }
        }

        if selected.len() % 2 == 0 {
            let spare = hosts
                .iter()
                .find(|h| !selected.iter().any(|s| s.id() == h.id()));
            match spare {
                Some(host) => selected.push(host),
                None => {
                    selected.pop();
                }
            }
        }

        Ok(selected.into_iter().map(|h| h.id().clone()).collect())
    }
}
