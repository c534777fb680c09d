use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `default_filter`; a malformed `default_filter` falls
/// back to `info` rather than silencing everything.
pub fn build_filter(env_value: Option<&str>, default_filter: &str) -> EnvFilter {
    env_value
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Output goes to stderr so stdout only carries the quote.
pub fn init_tracing(default_filter: &str) {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(env_value.as_deref(), default_filter))
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

pub fn parse_metrics_addr(addr: &str) -> anyhow::Result<SocketAddr> {
    addr.parse()
        .with_context(|| format!("invalid metrics_addr `{addr}`"))
}

#[cfg(feature = "metrics-exporter")]
pub fn init_metrics(addr: &str) -> anyhow::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let addr = parse_metrics_addr(addr)?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Prometheus exporter listening");
    metrics::gauge!("aggbook_up").set(1.0);
    Ok(())
}

// Address still validated so a bad setting fails the same way with or without the exporter
#[cfg(not(feature = "metrics-exporter"))]
pub fn init_metrics(addr: &str) -> anyhow::Result<()> {
    parse_metrics_addr(addr).map(|_| ())
}
