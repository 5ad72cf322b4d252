//! Application Layer
//!
//! Use cases that orchestrate the assembly.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `AssemblyPipeline` - Quorum, placement, links, ports, resolution
//! - `DiffUseCase` - Assemble and compare against a previous topology

pub mod assemble;
pub mod diff;

pub use assemble::{AssemblyOptions, AssemblyPipeline};
pub use diff::{DiffOutcome, DiffUseCase};
