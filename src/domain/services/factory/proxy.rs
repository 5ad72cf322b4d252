//! Proxy (nginx-elk)
//!
//! The cluster gateway. Each endpoint is named `<upstream>.<scheme>` and
//! gets its own `server` block forwarding to the matching upstream.

use std::fmt::Write as _;

use crate::domain::entities::{
    ArtifactContent, ArtifactSource, Endpoint, Host, Protocol, ServiceInstance,
};
use crate::domain::services::factory::ServiceInstanceFactory;
use crate::domain::services::{Linked, ResolveContext};
use crate::domain::value_objects::Role;
use crate::error::ElkformResult;

pub const KIBANA_HTTP: &str = "kibana.http";
pub const KIBANA_HTTPS: &str = "kibana.https";
pub const ELASTICSEARCH_HTTP: &str = "elasticsearch.http";
pub const ELASTICSEARCH_HTTPS: &str = "elasticsearch.https";

/// Search node `http` endpoints followed by the dashboard `http` endpoint
pub const UPSTREAM_LINK: &str = "upstream";

/// Directory the TLS certificate bundle is mounted under
pub const CERT_DIR: &str = "/etc/nginx/certs";
pub const CERTIFICATE: &str = "server.pem";

const LOG_DIR: &str = "/var/log/nginx";

pub(super) fn build(factory: &ServiceInstanceFactory, host: &Host) -> ServiceInstance {
    let gateway = factory.settings().gateway;
    let logs = format!(
        "{}/logs",
        factory
            .settings()
            .storage
            .data_path(host.id(), Role::Proxy.service_name())
    );
    factory
        .base(host, Role::Proxy)
        .with_endpoint(
            KIBANA_HTTP,
            Endpoint::exposed(Protocol::Http, 80).with_requested_port(gateway.http),
        )
        .with_endpoint(
            KIBANA_HTTPS,
            Endpoint::exposed(Protocol::Https, 443).with_requested_port(gateway.https),
        )
        .with_endpoint(ELASTICSEARCH_HTTP, Endpoint::exposed(Protocol::Http, 9200))
        .with_endpoint(
            ELASTICSEARCH_HTTPS,
            Endpoint::exposed(Protocol::Https, 9443),
        )
        .with_volume(LOG_DIR, logs)
        .with_artifact("elk.site", ArtifactSource::deferred(render_site))
        .with_artifact_in(
            CERT_DIR,
            CERTIFICATE,
            ArtifactSource::deferred(render_certificate),
        )
}

/// Certificate bundle for the proxy's host. Without a `server.pem`
/// template the bundle is a placeholder naming the host.
fn render_certificate(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    ctx.render_or(CERTIFICATE, &ctx.base_vars(), || {
        Ok(ArtifactContent::Text(format!(
            "# no certificate supplied for {} ({})\n",
            ctx.host().id(),
            ctx.host().address()
        )))
    })
}

fn upstream_block(name: &str, members: &[Linked<'_>]) -> ElkformResult<String> {
    let mut block = format!("upstream {} {{\n", name);
    for member in members {
        let _ = writeln!(block, "    server {};", member.external_address()?);
    }
    block.push_str("}\n");
    Ok(block)
}

fn server_block(endpoint: &Endpoint, upstream: &str) -> String {
    let mut block = String::from("server {\n");
    match endpoint.protocol() {
        Protocol::Https => {
            let _ = writeln!(block, "    listen {} ssl;", endpoint.internal_port());
            let _ = writeln!(block, "    ssl_certificate {}/{};", CERT_DIR, CERTIFICATE);
            let _ = writeln!(block, "    ssl_certificate_key {}/{};", CERT_DIR, CERTIFICATE);
        }
        _ => {
            let _ = writeln!(block, "    listen {};", endpoint.internal_port());
        }
    }
    block.push_str("    location / {\n");
    let _ = writeln!(block, "        proxy_pass http://{};", upstream);
    block.push_str("        proxy_set_header Host $host;\n");
    block.push_str("    }\n}\n");
    block
}

fn render_site(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    let (search, dashboards): (Vec<Linked<'_>>, Vec<Linked<'_>>) = ctx
        .linked(UPSTREAM_LINK)?
        .into_iter()
        .filter(|l| matches!(l.instance.role(), Role::SearchNode | Role::Dashboard))
        .partition(|l| l.instance.role() == Role::SearchNode);

    let elasticsearch_upstream = upstream_block("elasticsearch", &search)?;
    let kibana_upstream = upstream_block("kibana", &dashboards)?;

    let mut vars = ctx.base_vars();
    vars.insert("elasticsearch_upstream", elasticsearch_upstream.clone());
    vars.insert("kibana_upstream", kibana_upstream.clone());

    ctx.render_or("elk.site", &vars, || {
        let mut site = elasticsearch_upstream.clone();
        site.push('\n');
        site.push_str(&kibana_upstream);
        for (name, endpoint) in ctx.instance().endpoints() {
            let upstream = name.split('.').next().unwrap_or(name);
            site.push('\n');
            site.push_str(&server_block(endpoint, upstream));
        }
        Ok(ArtifactContent::Text(site))
    })
}
