use crate::config::{mask_api_key, GatewayConfig};
use askdb_llm_sdk::calypso::CalypsoClient;
use askdb_llm_sdk::client::LlmClient;
use std::sync::Arc;
use std::time::Duration;

pub fn create_llm_client(
    gateway: &GatewayConfig,
    api_key: String,
) -> anyhow::Result<Arc<dyn LlmClient>> {
    tracing::info!(
        base_url = %gateway.base_url,
        provider = %gateway.provider,
        api_key = %mask_api_key(&api_key),
        "Configuring prompt gateway client"
    );

    let client = CalypsoClient::new(api_key)?
        .with_base_url(gateway.base_url.clone())
        .with_provider(gateway.provider.clone())
        .with_timeout(Duration::from_secs(gateway.timeout_secs))?;

    Ok(Arc::new(client))
}
