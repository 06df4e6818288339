//! `serve` — start the HTTP gateway.

use semroute_config::AppConfig;
use tracing::info;

pub async fn run(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.gateway.port = port;
    }

    if !config.has_api_key() {
        tracing::warn!("No API key configured — provider calls will fail and every reply will be degraded");
    }

    let engine = super::build_engine(&config).await?;
    info!(host = %config.gateway.host, port = config.gateway.port, "Starting gateway");

    semroute_gateway::start(&config, engine)
        .await
        .map_err(|e| anyhow::anyhow!("gateway error: {e}"))?;
    Ok(())
}
