//! Config artifact entity
//!
//! An artifact is a configuration file mounted into an instance. Immediate
//! artifacts carry fixed content. Deferred artifacts are pure functions of
//! the frozen topology and are evaluated exactly once, after the freeze.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::services::ResolveContext;
use crate::domain::value_objects::ContentHash;
use crate::error::ElkformResult;

/// Content of an artifact before it is rendered to text
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactContent {
    /// Plain text, written verbatim
    Text(String),
    /// Structured map rendered as YAML
    Yaml(serde_json::Value),
    /// Structured value rendered as pretty JSON
    Json(serde_json::Value),
}

impl ArtifactContent {
    pub fn text(text: impl Into<String>) -> Self {
        ArtifactContent::Text(text.into())
    }

    /// Render to the final file content
    pub fn render(&self) -> ElkformResult<String> {
        Ok(match self {
            ArtifactContent::Text(text) => text.clone(),
            ArtifactContent::Yaml(value) => serde_yaml_ng::to_string(value)?,
            ArtifactContent::Json(value) => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                out
            }
        })
    }
}

/// A deferred artifact body: reads the frozen topology, never mutates it
pub type DeferredFn =
    Arc<dyn Fn(&ResolveContext<'_>) -> ElkformResult<ArtifactContent> + Send + Sync>;

/// How an artifact's content is obtained
#[derive(Clone)]
pub enum ArtifactSource {
    Immediate(ArtifactContent),
    Deferred(DeferredFn),
}

impl ArtifactSource {
    /// Wrap a closure as a deferred artifact
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&ResolveContext<'_>) -> ElkformResult<ArtifactContent> + Send + Sync + 'static,
    {
        ArtifactSource::Deferred(Arc::new(f))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ArtifactSource::Deferred(_))
    }
}

impl fmt::Debug for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSource::Immediate(content) => f.debug_tuple("Immediate").field(content).finish(),
            ArtifactSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// An artifact after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    /// Absolute path inside the container
    pub path: String,
    pub content: String,
    pub digest: ContentHash,
}

impl ResolvedArtifact {
    pub fn new(path: impl Into<String>, content: String) -> Self {
        let digest = ContentHash::of(&content);
        Self {
            path: path.into(),
            content,
            digest,
        }
    }
}
