//! Dashboard (kibana)

use crate::domain::entities::{
    ArtifactContent, ArtifactSource, Endpoint, Host, Protocol, ServiceInstance,
};
use crate::domain::services::factory::ServiceInstanceFactory;
use crate::domain::services::ResolveContext;
use crate::domain::value_objects::Role;
use crate::error::{ElkformError, ElkformResult};

pub const HTTP: &str = "http";

/// Where the browser reaches elasticsearch; ends up on the proxy
pub const ELASTICSEARCH_LINK: &str = "elasticsearch";

pub(super) fn build(factory: &ServiceInstanceFactory, host: &Host) -> ServiceInstance {
    let requested = factory.settings().gateway.dashboard;
    factory
        .base(host, Role::Dashboard)
        .with_endpoint(
            HTTP,
            Endpoint::exposed(Protocol::Http, 80).with_requested_port(requested),
        )
        .with_artifact("config.js", ArtifactSource::deferred(render_config_js))
}

fn elasticsearch_url(ctx: &ResolveContext<'_>) -> ElkformResult<String> {
    let targets = ctx.linked(ELASTICSEARCH_LINK)?;
    let target = targets
        .iter()
        .find(|t| t.endpoint.protocol() == Protocol::Http)
        .or_else(|| targets.first())
        .ok_or_else(|| ElkformError::MissingLink {
            instance: ctx.instance().name().to_string(),
            link: ELASTICSEARCH_LINK.to_string(),
        })?;
    Ok(format!(
        "{}://{}",
        target.endpoint.protocol().scheme(),
        target.external_address()?
    ))
}

fn render_config_js(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    let url = elasticsearch_url(ctx)?;
    let mut vars = ctx.base_vars();
    vars.insert("elasticsearch_url", url.clone());

    ctx.render_or("config.js", &vars, || {
        Ok(ArtifactContent::Text(format!(
            r#"define(['settings'],
function (Settings) {{
  "use strict";
  return new Settings({{
    elasticsearch: "{}",
    default_route: '/dashboard/file/default.json',
    kibana_index: "kibana-int",
    panel_names: [
      'histogram',
      'map',
      'table',
      'filtering',
      'timepicker',
      'text',
      'hits',
      'column',
      'trends',
      'bettermap',
      'query',
      'terms',
      'stats',
      'sparklines'
    ]
  }});
}});
"#,
            url
        )))
    })
}
