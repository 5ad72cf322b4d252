//! Diff Use Case
//!
//! Assembles a fresh topology from the current inputs and compares it with
//! a previously emitted one. Nothing is written; this is a dry run of
//! `assemble`.

use std::sync::Arc;

use crate::domain::entities::ClusterTopology;
use crate::domain::ports::{AssemblyEventSink, HostInventory, NoopEventSink};
use crate::domain::services::TopologyDiff;
use crate::error::ElkformResult;

use super::assemble::{AssemblyOptions, AssemblyPipeline};

/// Result of the diff operation
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    /// The freshly assembled topology
    pub topology: ClusterTopology,
    pub diff: TopologyDiff,
}

impl DiffOutcome {
    /// Whether a redeploy would change anything
    pub fn has_changes(&self) -> bool {
        !self.diff.is_empty()
    }
}

pub struct DiffUseCase<HI>
where
    HI: HostInventory,
{
    pipeline: AssemblyPipeline<HI>,
}

impl<HI> DiffUseCase<HI>
where
    HI: HostInventory,
{
    pub fn new(pipeline: AssemblyPipeline<HI>) -> Self {
        Self { pipeline }
    }

    pub fn execute(
        &self,
        previous: &ClusterTopology,
        options: &AssemblyOptions,
    ) -> ElkformResult<DiffOutcome> {
        self.execute_with_events(previous, options, Arc::new(NoopEventSink))
    }

    pub fn execute_with_events(
        &self,
        previous: &ClusterTopology,
        options: &AssemblyOptions,
        events: Arc<dyn AssemblyEventSink>,
    ) -> ElkformResult<DiffOutcome> {
        let topology = self.pipeline.assemble_with_events(options, events)?;
        let diff = TopologyDiff::between(previous, &topology);
        Ok(DiffOutcome { topology, diff })
    }

    /// Same as [`DiffUseCase::execute`] with the previous topology as JSON
    pub fn execute_json(
        &self,
        previous_json: &str,
        options: &AssemblyOptions,
    ) -> ElkformResult<DiffOutcome> {
        let previous = ClusterTopology::from_json(previous_json)?;
        self.execute(&previous, options)
    }
}
