//! CLI command implementations.

pub mod chat;
pub mod serve;

use semroute_config::AppConfig;
use semroute_core::tool::ToolRegistry;
use semroute_engine::RouterEngine;
use semroute_providers::OpenAiCompatProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the routing engine from configuration: provider, pre-embedded
/// catalog, and the engine itself. Catalog problems (duplicate names,
/// unreachable embedding provider) fail here, at startup.
pub async fn build_engine(config: &AppConfig) -> anyhow::Result<Arc<RouterEngine>> {
    let provider = Arc::new(OpenAiCompatProvider::from_config(config));

    info!(tools = semroute_tools::default_catalog().len(), "Embedding tool catalog");
    let registry = Arc::new(
        ToolRegistry::build(semroute_tools::default_catalog(), provider.as_ref()).await?,
    );

    let engine = RouterEngine::new(registry, provider.clone(), provider)
        .with_window(config.memory.window)
        .with_provider_timeout(Duration::from_secs(config.provider_timeout_secs))
        .with_fallback_tool(&config.fallback_tool)
        .with_max_response_chars(config.max_response_chars);

    Ok(Arc::new(engine))
}
