//! Directory Template Source
//!
//! Every regular file directly inside the directory is a template named
//! after its file name (`zoo.cfg`, `elk.site`, ...). Files are read once at
//! load time so resolution itself never touches the disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::ports::TemplateSource;
use crate::error::ElkformResult;

#[derive(Debug, Clone, Default)]
pub struct DirTemplateSource {
    templates: BTreeMap<String, String>,
}

impl DirTemplateSource {
    /// Read every template in `root`
    pub fn load(root: impl AsRef<Path>) -> ElkformResult<Self> {
        let root = root.as_ref();
        let mut templates = BTreeMap::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let text = fs::read_to_string(entry.path())?;
            debug!(template = %name, "loaded template");
            templates.insert(name, text);
        }
        Ok(Self { templates })
    }

    /// Template names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl TemplateSource for DirTemplateSource {
    fn template(&self, name: &str) -> Option<String> {
        self.templates.get(name).cloned()
    }
}
