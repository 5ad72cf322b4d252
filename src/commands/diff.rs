use std::path::Path;

use anyhow::{Context, Result};

use elkform::presentation::cli::AssemblyArgs;
use elkform::presentation::factory::create_diff_use_case;
use elkform::presentation::output::{render_diff, OutputFormat};

pub fn cmd_diff(args: &AssemblyArgs, previous: &Path, json: bool, verbose: u8) -> Result<()> {
    let options = super::resolve_options(args)?;
    let previous_json = std::fs::read_to_string(previous)
        .with_context(|| format!("reading previous topology {}", previous.display()))?;
    let previous = elkform::ClusterTopology::from_json(&previous_json)
        .with_context(|| format!("parsing previous topology {}", previous.display()))?;

    let use_case = create_diff_use_case(&args.inventory, args.templates.as_deref())?;
    let outcome =
        use_case.execute_with_events(&previous, &options, super::event_sink(json, verbose))?;

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "has_changes": outcome.has_changes(),
                "summary": outcome.diff.summary(),
                "diff": outcome.diff,
            })
        ),
        OutputFormat::Text => print!("{}", render_diff(&outcome.diff, verbose)),
    }
    Ok(())
}
