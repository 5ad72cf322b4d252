//! Tests for the config module

use super::types::*;
use super::{apply_env, parse_with_warnings};
use crate::domain::value_objects::PortPool;
use crate::error::ElkformError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.cluster.name, "elk");
    assert_eq!(config.ports.pool().unwrap(), PortPool::default());
    assert_eq!(config.gateway.http_port, 80);
    assert_eq!(config.memory.search_percent, 75);
    assert_eq!(config.data.root, "/var/lib");
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[cluster]
name = "logs"

[images]
search_node = { repository = "registry.local/elasticsearch", tag = "1.3.2" }

[ports]
low = 5000
high = 5010
explicit = { "kibana-node1/http" = 8080 }

[gateway]
http_port = 8000
https_port = 0

[memory]
search_percent = 50

[data]
root = "/srv"
hosts = { node2 = "/data" }
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.cluster.name, "logs");
    assert_eq!(config.images.search_node.to_string(), "registry.local/elasticsearch:1.3.2");
    assert_eq!(config.images.dashboard.repository, "nikicat/kibana");
    assert_eq!(config.ports.explicit["kibana-node1/http"], 8080);
    assert_eq!(config.gateway.ports().http, Some(8000));
    assert_eq!(config.gateway.ports().https, None);
    assert_eq!(config.data.hosts["node2"], "/data");
}

#[test]
fn test_assembly_options_from_config() {
    let toml = r#"
[cluster]
name = "logs"

[ports]
low = 6000
high = 6100
explicit = { "elasticsearch-node1/http" = 9200 }
"#;
    let config: Config = toml::from_str(toml).unwrap();
    let options = config.assembly_options().unwrap();

    assert_eq!(options.cluster_name(), "logs");
    assert_eq!(options.port_pool, PortPool::new(6000, 6100).unwrap());
    assert_eq!(options.explicit_ports["elasticsearch-node1/http"], 9200);
    assert_eq!(options.settings.gateway.https, Some(443));
}

#[test]
fn test_unknown_keys_warn_with_suggestion() {
    let toml = r#"
[ports]
lwo = 5000
"#;
    let (config, warnings) = parse_with_warnings(toml, Path::new("elkform.toml")).unwrap();

    assert_eq!(config.ports.low, 31000);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "lwo");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("low"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = parse_with_warnings("[memory]\nsearch_percent = 0\n", Path::new("elkform.toml"))
        .unwrap_err();
    assert!(matches!(err, ElkformError::InvalidConfig { .. }));

    let err = parse_with_warnings("[ports]\nlow = 10\nhigh = 5\n", Path::new("elkform.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("ports.low (10) exceeds ports.high (5)"));

    let err = parse_with_warnings(
        "[ports]\nexplicit = { kibana = 80 }\n",
        Path::new("elkform.toml"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("'<instance>/<endpoint>'"));
}

#[test]
fn test_explicit_port_zero_is_rejected() {
    let err = parse_with_warnings(
        "[ports]\nexplicit = { \"kibana-node1/http\" = 0 }\n",
        Path::new("elkform.toml"),
    )
    .unwrap_err();
    assert!(matches!(err, ElkformError::InvalidConfig { .. }));
    assert!(err
        .to_string()
        .contains("ports.explicit port for 'kibana-node1/http' must be non-zero"));
}

#[test]
fn test_malformed_toml_names_the_file() {
    let err = parse_with_warnings("[cluster\n", Path::new("broken.toml")).unwrap_err();
    match err {
        ElkformError::InvalidConfig { file, .. } => assert_eq!(file, Path::new("broken.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("ELKFORM_CLUSTER_NAME", "prod"),
        ("ELKFORM_PORT_POOL", "7000-7099"),
    ]
    .into_iter()
    .collect();

    let config = apply_env(Config::default(), |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.cluster.name, "prod");
    assert_eq!(config.ports.low, 7000);
    assert_eq!(config.ports.high, 7099);
}

#[test]
fn test_invalid_env_pool_is_ignored() {
    let config = apply_env(Config::default(), |k| {
        (k == "ELKFORM_PORT_POOL").then(|| "9000-1".to_string())
    });
    assert_eq!(config.ports.pool().unwrap(), PortPool::default());
}

#[test]
fn test_load_project_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("elkform.toml"),
        "[cluster]\nname = \"from-file\"\n",
    )
    .unwrap();

    let config = Config::load(&dir.path().join("elkform.toml")).unwrap();
    assert_eq!(config.cluster.name, "from-file");
}
