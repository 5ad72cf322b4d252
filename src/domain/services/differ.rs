//! Topology differ
//!
//! Compares a previously emitted topology with a fresh one so deployment
//! tooling can tell what a rerun would change. Artifact bodies are compared
//! line by line with `similar`.

use std::collections::BTreeSet;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::domain::entities::{ClusterTopology, InstanceRecord};
use crate::domain::value_objects::qualified_endpoint;

/// Counts of a line diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub additions: usize,
    pub deletions: usize,
}

impl LineStats {
    /// e.g. "+5, -3"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// An external port that moved, appeared or disappeared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortChange {
    /// `<instance>/<endpoint>`
    pub endpoint: String,
    pub old: Option<u16>,
    pub new: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactChangeKind {
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactChange {
    pub instance: String,
    pub artifact: String,
    pub kind: ArtifactChangeKind,
    pub stats: LineStats,
    /// Unified diff with three lines of context
    pub unified: String,
}

/// Everything that differs between two topologies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopologyDiff {
    pub added_instances: Vec<String>,
    pub removed_instances: Vec<String>,
    pub port_changes: Vec<PortChange>,
    pub artifact_changes: Vec<ArtifactChange>,
}

impl TopologyDiff {
    pub fn between(old: &ClusterTopology, new: &ClusterTopology) -> Self {
        let old_names: BTreeSet<&str> = old.instances.iter().map(|i| i.name.as_str()).collect();
        let new_names: BTreeSet<&str> = new.instances.iter().map(|i| i.name.as_str()).collect();

        let mut diff = TopologyDiff {
            added_instances: new_names
                .difference(&old_names)
                .map(|n| n.to_string())
                .collect(),
            removed_instances: old_names
                .difference(&new_names)
                .map(|n| n.to_string())
                .collect(),
            ..Self::default()
        };

        for name in old_names.intersection(&new_names) {
            if let (Some(before), Some(after)) = (old.instance(name), new.instance(name)) {
                diff.port_changes.extend(port_changes(before, after));
                diff.artifact_changes.extend(artifact_changes(before, after));
            }
        }
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added_instances.is_empty()
            && self.removed_instances.is_empty()
            && self.port_changes.is_empty()
            && self.artifact_changes.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} added, {} removed, {} port changes, {} artifact changes",
            self.added_instances.len(),
            self.removed_instances.len(),
            self.port_changes.len(),
            self.artifact_changes.len()
        )
    }
}

fn port_changes(before: &InstanceRecord, after: &InstanceRecord) -> Vec<PortChange> {
    let names: BTreeSet<&String> = before.endpoints.keys().chain(after.endpoints.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            let old = before.endpoints.get(name).and_then(|e| e.external_port());
            let new = after.endpoints.get(name).and_then(|e| e.external_port());
            (old != new).then(|| PortChange {
                endpoint: qualified_endpoint(&after.name, name),
                old,
                new,
            })
        })
        .collect()
}

fn artifact_changes(before: &InstanceRecord, after: &InstanceRecord) -> Vec<ArtifactChange> {
    let names: BTreeSet<&String> = before.artifacts.keys().chain(after.artifacts.keys()).collect();
    let mut changes = Vec::new();
    for name in names {
        let old = before.artifacts.get(name);
        let new = after.artifacts.get(name);
        let kind = match (old, new) {
            (Some(o), Some(n)) if o.digest == n.digest => continue,
            (Some(_), Some(_)) => ArtifactChangeKind::Modified,
            (None, Some(_)) => ArtifactChangeKind::Added,
            (Some(_), None) => ArtifactChangeKind::Removed,
            (None, None) => continue,
        };
        let old_text = old.map(|a| a.content.as_str()).unwrap_or("");
        let new_text = new.map(|a| a.content.as_str()).unwrap_or("");
        let path = new.or(old).map(|a| a.path.as_str()).unwrap_or(name);
        changes.push(ArtifactChange {
            instance: after.name.clone(),
            artifact: name.clone(),
            kind,
            stats: line_stats(old_text, new_text),
            unified: unified(old_text, new_text, path),
        });
    }
    changes
}

/// Count inserted and deleted lines
pub fn line_stats(old: &str, new: &str) -> LineStats {
    let mut stats = LineStats::default();
    for change in TextDiff::from_lines(old, new).iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => stats.deletions += 1,
            ChangeTag::Insert => stats.additions += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}

/// Unified diff of `old` against `new`, headed with `path`
pub fn unified(old: &str, new: &str, path: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a{}", path), &format!("b{}", path))
        .to_string()
}
