//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::application::{AssemblyPipeline, DiffUseCase};
use crate::domain::ports::{NoTemplates, TemplateSource};
use crate::error::ElkformResult;
use crate::infrastructure::{DirTemplateSource, TomlHostInventory};

/// Pipeline reading hosts from a TOML inventory
pub type ConcreteAssemblyPipeline = AssemblyPipeline<TomlHostInventory>;

pub type ConcreteDiffUseCase = DiffUseCase<TomlHostInventory>;

/// Template source for an optional override directory
pub fn create_template_source(templates: Option<&Path>) -> ElkformResult<Arc<dyn TemplateSource>> {
    Ok(match templates {
        Some(dir) => {
            let source = DirTemplateSource::load(dir)?;
            let names: Vec<&str> = source.names().collect();
            info!(dir = %dir.display(), templates = ?names, "template overrides loaded");
            Arc::new(source)
        }
        None => Arc::new(NoTemplates),
    })
}

pub fn create_assembly_pipeline(
    inventory: &Path,
    templates: Option<&Path>,
) -> ElkformResult<ConcreteAssemblyPipeline> {
    Ok(AssemblyPipeline::new(
        TomlHostInventory::new(inventory),
        create_template_source(templates)?,
    ))
}

pub fn create_diff_use_case(
    inventory: &Path,
    templates: Option<&Path>,
) -> ElkformResult<ConcreteDiffUseCase> {
    Ok(DiffUseCase::new(create_assembly_pipeline(inventory, templates)?))
}
