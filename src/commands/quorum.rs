use std::path::Path;

use anyhow::Result;

use elkform::domain::ports::HostInventory;
use elkform::domain::services::QuorumSelector;
use elkform::infrastructure::TomlHostInventory;
use elkform::presentation::output::{render_quorum, OutputFormat};

pub fn cmd_quorum(inventory: &Path, json: bool) -> Result<()> {
    let hosts = TomlHostInventory::new(inventory).load_hosts()?;
    let quorum = QuorumSelector::select(&hosts)?;

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => {
            let members: Vec<&str> = quorum.iter().map(|h| h.as_str()).collect();
            println!(
                "{}",
                serde_json::json!({
                    "hosts": hosts.len(),
                    "quorum": members,
                })
            );
        }
        OutputFormat::Text => print!("{}", render_quorum(&hosts, &quorum)),
    }
    Ok(())
}
