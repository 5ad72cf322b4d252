//! Assemble Module
//!
//! Runs the assembly pipeline end to end.
//!
//! ## Structure
//!
//! - `options` - Inputs besides hosts and templates (`AssemblyOptions`)
//! - `use_case` - The phase sequence (`AssemblyPipeline`)
//!
//! ## Usage
//!
//! ```ignore
//! use elkform::application::assemble::{AssemblyOptions, AssemblyPipeline};
//!
//! let pipeline = AssemblyPipeline::new(inventory, templates);
//! let topology = pipeline.assemble(&AssemblyOptions::new("logs"))?;
//! ```

mod options;
mod use_case;

pub use options::AssemblyOptions;
pub use use_case::AssemblyPipeline;

#[cfg(test)]
mod tests;
