//! Command handlers for the elkform binary

pub mod assemble;
pub mod diff;
pub mod quorum;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use elkform::application::AssemblyOptions;
use elkform::config::Config;
use elkform::domain::ports::AssemblyEventSink;
use elkform::infrastructure::{JsonEventSink, TracingEventSink};
use elkform::presentation::cli::AssemblyArgs;

/// Resolve assembly options: config file, then environment, then flags
///
/// Config warnings are printed to stderr and never fail the command.
pub fn resolve_options(args: &AssemblyArgs) -> Result<AssemblyOptions> {
    let (config, warnings) = match &args.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            (config.with_env_overrides(), warnings)
        }
        None => {
            let cwd = std::env::current_dir()?;
            Config::load_or_default(Some(cwd.as_path()))?
        }
    };
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    let mut options = config.assembly_options()?;
    if let Some(name) = &args.name {
        options = options.with_cluster_name(name.clone());
    }
    if let Some(pool) = args.port_pool {
        options = options.with_port_pool(pool);
    }
    Ok(options)
}

/// NDJSON on stderr for `--json`, tracing otherwise
pub fn event_sink(json: bool, verbose: u8) -> Arc<dyn AssemblyEventSink> {
    if json {
        Arc::new(JsonEventSink::stderr())
    } else {
        Arc::new(TracingEventSink::new().detailed(verbose > 1))
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
