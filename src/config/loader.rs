//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::PortPool;
use crate::error::{ElkformError, ElkformResult};

pub use crate::domain::value_objects::ConfigWarning;

use super::types::Config;

/// File name looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "elkform.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ElkformResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse configuration text; `path` is only used in diagnostics
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ElkformResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e.to_string()))?;

    validate(&config, path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

fn invalid(path: &Path, message: impl Into<String>) -> ElkformError {
    ElkformError::InvalidConfig {
        file: path.to_path_buf(),
        message: message.into(),
    }
}

fn validate(config: &Config, path: &Path) -> ElkformResult<()> {
    if config.cluster.name.trim().is_empty() {
        return Err(invalid(path, "cluster.name must not be empty"));
    }
    if !(1..=100).contains(&config.memory.search_percent) {
        return Err(invalid(
            path,
            format!(
                "memory.search_percent must be between 1 and 100, got {}",
                config.memory.search_percent
            ),
        ));
    }
    if config.ports.low > config.ports.high {
        return Err(invalid(
            path,
            format!(
                "ports.low ({}) exceeds ports.high ({})",
                config.ports.low, config.ports.high
            ),
        ));
    }
    if let Some(key) = config.ports.explicit.keys().find(|k| !k.contains('/')) {
        return Err(invalid(
            path,
            format!("ports.explicit key '{}' must be '<instance>/<endpoint>'", key),
        ));
    }
    if let Some((key, _)) = config.ports.explicit.iter().find(|(_, port)| **port == 0) {
        return Err(invalid(
            path,
            format!("ports.explicit port for '{}' must be non-zero", key),
        ));
    }
    Ok(())
}

/// Load from project config, user config, or defaults
///
/// The first file found wins; files are not merged. Environment overrides
/// are applied on top in every case.
pub fn load_or_default(project_root: Option<&Path>) -> ElkformResult<(Config, Vec<ConfigWarning>)> {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if path.exists() {
            debug!(path = %path.display(), "loading configuration");
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `~/.config/elkform/config.toml` (platform config dir)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("elkform").join("config.toml"))
}

/// Apply environment variable overrides (ELKFORM_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub fn apply_env<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // ELKFORM_CLUSTER_NAME
    if let Some(name) = lookup("ELKFORM_CLUSTER_NAME").filter(|n| !n.trim().is_empty()) {
        config.cluster.name = name;
    }

    // ELKFORM_PORT_POOL (low-high)
    if let Some(pool) = lookup("ELKFORM_PORT_POOL") {
        match pool.parse::<PortPool>() {
            Ok(pool) => {
                config.ports.low = pool.low();
                config.ports.high = pool.high();
            }
            Err(e) => warn!(value = %pool, error = %e, "ignoring invalid ELKFORM_PORT_POOL"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "cluster",
        "name",
        "images",
        "search_node",
        "ensemble_node",
        "proxy",
        "dashboard",
        "repository",
        "tag",
        "ports",
        "low",
        "high",
        "explicit",
        "gateway",
        "http_port",
        "https_port",
        "dashboard_port",
        "memory",
        "search_percent",
        "ensemble_bytes",
        "proxy_bytes",
        "dashboard_bytes",
        "data",
        "root",
        "hosts",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
