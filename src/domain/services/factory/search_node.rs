//! Search node (elasticsearch)

use serde_json::json;

use crate::domain::entities::{
    ArtifactContent, ArtifactSource, Endpoint, Host, Protocol, ServiceInstance,
};
use crate::domain::services::factory::ServiceInstanceFactory;
use crate::domain::services::ResolveContext;
use crate::domain::value_objects::Role;
use crate::error::ElkformResult;

pub const HTTP: &str = "http";
pub const PEER: &str = "peer";

/// Every other search node's `peer` endpoint
pub const PEER_LINK: &str = "peer";
/// The `client` endpoints of the quorum's ensemble nodes
pub const ENSEMBLE_LINK: &str = "ensemble";

const DATA_DIR: &str = "/var/lib/elasticsearch";

const LOGGING_YML: &str = "\
es.logger.level: INFO
rootLogger: ${es.logger.level}, console
logger:
  action: DEBUG
  com.amazonaws: WARN
appender:
  console:
    type: console
    layout:
      type: consolePattern
      conversionPattern: \"[%d{ISO8601}][%-5p][%-25c] %m%n\"
";

const MAPPING_JSON: &str = r#"{
  "_default_": {
    "_all": { "enabled": true },
    "dynamic_templates": [
      {
        "string_fields": {
          "match": "*",
          "match_mapping_type": "string",
          "mapping": { "type": "string", "index": "not_analyzed" }
        }
      }
    ]
  }
}
"#;

pub(super) fn build(factory: &ServiceInstanceFactory, host: &Host) -> ServiceInstance {
    let instance = factory
        .base(host, Role::SearchNode)
        .with_endpoint(
            HTTP,
            Endpoint::exposed(Protocol::Http, 9200).with_path("health", "/_cluster/health"),
        )
        .with_endpoint(PEER, Endpoint::internal(Protocol::Tcp, 9300))
        .with_artifact("elasticsearch.yml", ArtifactSource::deferred(render_config))
        .with_artifact("mapping.json", factory.immediate("mapping.json", MAPPING_JSON))
        .with_artifact("logging.yml", factory.immediate("logging.yml", LOGGING_YML));
    factory.with_data_volume(instance, host)
}

fn render_config(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    let peers: Vec<String> = ctx
        .linked(PEER_LINK)?
        .iter()
        .map(|p| p.internal_address())
        .collect();
    let zookeeper_hosts = ctx
        .linked(ENSEMBLE_LINK)?
        .iter()
        .map(|e| e.internal_address())
        .collect::<Vec<_>>()
        .join(",");
    let http_port = ctx.own_endpoint(HTTP)?.internal_port();
    let transport_port = ctx.own_endpoint(PEER)?.internal_port();

    let mut vars = ctx.base_vars();
    vars.insert("unicast_hosts", peers.join(","));
    vars.insert("zookeeper_hosts", zookeeper_hosts.clone());
    vars.insert("http_port", http_port.to_string());
    vars.insert("transport_port", transport_port.to_string());

    ctx.render_or("elasticsearch.yml", &vars, || {
        Ok(ArtifactContent::Yaml(json!({
            "cluster.name": ctx.cluster_name(),
            "node.name": ctx.instance().name(),
            "network.publish_host": ctx.host().address(),
            "http.port": http_port,
            "transport.tcp.port": transport_port,
            "path.data": DATA_DIR,
            "discovery.zen.ping.multicast.enabled": false,
            "discovery.zen.ping.unicast.hosts": peers,
            "sonian.elasticsearch.zookeeper.client.host": zookeeper_hosts,
        })))
    })
}
