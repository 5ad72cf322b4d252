//! Presentation Layer
//!
//! Everything between the `elkform` binary and the use cases:
//! - `cli` - clap definitions shared by `main.rs` and its tests
//! - `factory` - builds pipelines over the TOML inventory and template directory
//! - `output` - text rendering of topologies, quorums and diffs
//!
//! ```ignore
//! use elkform::presentation::factory;
//!
//! let pipeline = factory::create_assembly_pipeline(&inventory, None)?;
//! let topology = pipeline.assemble(&options)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use factory::{create_assembly_pipeline, create_diff_use_case};
