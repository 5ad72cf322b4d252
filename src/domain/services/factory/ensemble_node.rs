//! Ensemble node (zookeeper)

use std::fmt::Write as _;

use crate::domain::entities::{
    ArtifactContent, ArtifactSource, Endpoint, Host, Protocol, ServiceInstance,
};
use crate::domain::services::factory::ServiceInstanceFactory;
use crate::domain::services::ResolveContext;
use crate::domain::value_objects::Role;
use crate::error::{ElkformError, ElkformResult};

pub const CLIENT: &str = "client";
pub const PEER: &str = "peer";
pub const ELECTION: &str = "election";
pub const JMX: &str = "jmx";

const DATA_DIR: &str = "/var/lib/zookeeper";
const JAVA_OPTS: &str = "-Xmx700m -Dcom.sun.management.jmxremote.port=4888 \
-Dcom.sun.management.jmxremote.authenticate=false -Dcom.sun.management.jmxremote.ssl=false";

const LOG4J_PROPERTIES: &str = "\
log4j.rootLogger=INFO, CONSOLE
log4j.appender.CONSOLE=org.apache.log4j.ConsoleAppender
log4j.appender.CONSOLE.Threshold=INFO
log4j.appender.CONSOLE.layout=org.apache.log4j.PatternLayout
log4j.appender.CONSOLE.layout.ConversionPattern=%d{ISO8601} [myid:%X{myid}] - %-5p [%t:%C{1}@%L] - %m%n
";

pub(super) fn build(factory: &ServiceInstanceFactory, host: &Host) -> ServiceInstance {
    let cluster = &factory.settings().cluster_name;
    let instance = factory
        .base(host, Role::EnsembleNode)
        .with_endpoint(CLIENT, Endpoint::internal(Protocol::Tcp, 2181))
        .with_endpoint(PEER, Endpoint::internal(Protocol::Tcp, 2888))
        .with_endpoint(ELECTION, Endpoint::internal(Protocol::Tcp, 3888))
        .with_endpoint(JMX, Endpoint::internal(Protocol::Tcp, 4888))
        .with_env("JAVA_OPTS", JAVA_OPTS)
        .with_env("JAVA_RMI_SERVER_HOSTNAME", host.address())
        .with_env("VISUALVM_DISPLAY_NAME", format!("{}-zookeeper", cluster))
        .with_artifact("zoo.cfg", ArtifactSource::deferred(render_zoo_cfg))
        .with_artifact("myid", ArtifactSource::deferred(render_myid))
        .with_artifact(
            "log4j.properties",
            factory.immediate("log4j.properties", LOG4J_PROPERTIES),
        );
    factory.with_data_volume(instance, host)
}

fn port_of(instance: &ServiceInstance, endpoint: &str) -> ElkformResult<u16> {
    instance
        .endpoint(endpoint)
        .map(|e| e.internal_port())
        .ok_or_else(|| ElkformError::MissingEndpoint {
            instance: instance.name().to_string(),
            endpoint: endpoint.to_string(),
        })
}

fn render_zoo_cfg(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    let mut servers = String::new();
    for (idx, member) in ctx.quorum_members().into_iter().enumerate() {
        let host = ctx
            .topology()
            .host(member.host())
            .ok_or_else(|| ElkformError::UnknownHost {
                instance: member.name().to_string(),
                host: member.host().to_string(),
            })?;
        let _ = writeln!(
            servers,
            "server.{}={}:{}:{}",
            idx + 1,
            host.address(),
            port_of(member, PEER)?,
            port_of(member, ELECTION)?
        );
    }
    let client_port = ctx.own_endpoint(CLIENT)?.internal_port();

    let mut vars = ctx.base_vars();
    vars.insert("servers", servers.clone());
    vars.insert("client_port", client_port.to_string());
    vars.insert("data_dir", DATA_DIR.to_string());

    ctx.render_or("zoo.cfg", &vars, || {
        Ok(ArtifactContent::Text(format!(
            "tickTime=2000\ninitLimit=10\nsyncLimit=5\ndataDir={}\nclientPort={}\n{}",
            DATA_DIR, client_port, servers
        )))
    })
}

/// Position of the instance within the quorum, counted from one
fn myid(ctx: &ResolveContext<'_>) -> ElkformResult<usize> {
    ctx.quorum_members()
        .iter()
        .position(|m| m.name() == ctx.instance().name())
        .map(|idx| idx + 1)
        .ok_or_else(|| ElkformError::MissingLink {
            instance: ctx.instance().name().to_string(),
            link: "quorum".to_string(),
        })
}

fn render_myid(ctx: &ResolveContext<'_>) -> ElkformResult<ArtifactContent> {
    let id = myid(ctx)?;
    let mut vars = ctx.base_vars();
    vars.insert("myid", id.to_string());
    ctx.render_or("myid", &vars, || Ok(ArtifactContent::Text(format!("{}\n", id))))
}
