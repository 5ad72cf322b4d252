//! Output Rendering
//!
//! Text renderings of command results. JSON output is the serde form of the
//! same values and is produced by the commands directly.

use std::fmt::Write as _;

use crate::domain::entities::{ClusterTopology, Host};
use crate::domain::services::TopologyDiff;
use crate::domain::value_objects::{ContentHash, HostId};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// `1.5 GiB`, `256 MiB`, `512 B`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = "B";
    for candidate in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = candidate;
    }
    if value.fract() == 0.0 {
        format!("{} {}", value as u64, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

/// Summary of an assembled topology
///
/// With `verbose > 0` every endpoint and artifact is listed as well.
pub fn render_topology(
    topology: &ClusterTopology,
    fingerprint: &ContentHash,
    verbose: u8,
) -> String {
    let mut out = String::new();
    let quorum: Vec<&str> = topology.quorum.iter().map(HostId::as_str).collect();
    let _ = writeln!(out, "Topology '{}'", topology.cluster_name);
    let _ = writeln!(out, "  quorum:      {}", quorum.join(", "));
    let _ = writeln!(out, "  port pool:   {}", topology.port_pool);
    let _ = writeln!(out, "  fingerprint: {}", fingerprint.short());
    let _ = writeln!(out);

    let width = topology
        .instances
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(0);
    for instance in &topology.instances {
        let _ = writeln!(
            out,
            "  {:<width$}  {:<13}  {} ({})  {}",
            instance.name,
            instance.role.to_string(),
            instance.host,
            instance.address,
            format_bytes(instance.memory),
            width = width
        );
        if verbose == 0 {
            continue;
        }
        for (name, endpoint) in &instance.endpoints {
            match endpoint.external_port() {
                Some(port) => {
                    let _ = writeln!(
                        out,
                        "      {} {}/{} -> {}",
                        name,
                        endpoint.protocol().scheme(),
                        endpoint.internal_port(),
                        port
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "      {} {}/{}",
                        name,
                        endpoint.protocol().scheme(),
                        endpoint.internal_port()
                    );
                }
            }
        }
        for artifact in instance.artifacts.values() {
            let _ = writeln!(out, "      {} {}", artifact.path, artifact.digest.short());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} instances, {} artifacts",
        topology.instances.len(),
        topology.artifact_count()
    );
    out
}

/// Elected hosts in quorum order
pub fn render_quorum(hosts: &[Host], quorum: &[HostId]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Quorum of {} from {} hosts:", quorum.len(), hosts.len());
    for (idx, id) in quorum.iter().enumerate() {
        match hosts.iter().find(|h| h.id() == id) {
            Some(host) => {
                let _ = writeln!(
                    out,
                    "  {}. {} ({}, {})",
                    idx + 1,
                    id,
                    host.address(),
                    host.partition()
                );
            }
            None => {
                let _ = writeln!(out, "  {}. {}", idx + 1, id);
            }
        }
    }
    out
}

/// Changes between two topologies; unified diffs only with `verbose > 0`
pub fn render_diff(diff: &TopologyDiff, verbose: u8) -> String {
    if diff.is_empty() {
        return "No changes\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Changes: {}", diff.summary());
    for name in &diff.added_instances {
        let _ = writeln!(out, "  + {}", name);
    }
    for name in &diff.removed_instances {
        let _ = writeln!(out, "  - {}", name);
    }
    for change in &diff.port_changes {
        let show = |p: Option<u16>| p.map_or_else(|| "none".to_string(), |p| p.to_string());
        let _ = writeln!(
            out,
            "  ~ {} port {} -> {}",
            change.endpoint,
            show(change.old),
            show(change.new)
        );
    }
    for change in &diff.artifact_changes {
        let _ = writeln!(
            out,
            "  ~ {}/{} ({:?}, {})",
            change.instance,
            change.artifact,
            change.kind,
            change.stats.summary()
        );
        if verbose > 0 {
            for line in change.unified.lines() {
                let _ = writeln!(out, "      {}", line);
            }
        }
    }
    out
}
