use std::path::Path;

use anyhow::Result;

use elkform::presentation::cli::AssemblyArgs;
use elkform::presentation::factory::create_assembly_pipeline;
use elkform::presentation::output::{render_topology, OutputFormat};

pub fn cmd_assemble(
    args: &AssemblyArgs,
    output: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let options = super::resolve_options(args)?;
    let pipeline = create_assembly_pipeline(&args.inventory, args.templates.as_deref())?;
    let topology = pipeline.assemble_with_events(&options, super::event_sink(json, verbose))?;
    let rendered = topology.to_json()?;

    if let Some(path) = output {
        super::write_file(path, &rendered)?;
    }

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => println!("{}", rendered),
        OutputFormat::Text => {
            let fingerprint = topology.fingerprint()?;
            print!("{}", render_topology(&topology, &fingerprint, verbose));
            if let Some(path) = output {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}
