use crate::{
    error::LlmError,
    types::{PromptOutcome, PromptRequest},
};
use async_trait::async_trait;

/// Core trait for prompt gateway clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a prompt and wait for the gateway's verdict
    async fn complete(&self, request: PromptRequest) -> Result<PromptOutcome, LlmError>;

    /// Get gateway name (e.g., "calypso")
    fn provider_name(&self) -> &str;

    /// Get the provider id forwarded to the gateway (e.g., "gpt-4o-mini")
    fn model_name(&self) -> &str;
}
