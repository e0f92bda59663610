use crate::{
    calypso::client::CalypsoClient,
    error::LlmError,
    types::{PromptOutcome, PromptRequest},
};

/// Builder for a single gateway prompt
pub struct PromptBuilder<'a> {
    client: &'a CalypsoClient,
    input: Option<String>,
    provider: Option<String>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(client: &'a CalypsoClient) -> Self {
        Self {
            client,
            input: None,
            provider: None,
        }
    }

    /// Set the prompt text
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Override the provider for this prompt only
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Send the prompt and convert the result into a typed outcome
    pub async fn send(self) -> Result<PromptOutcome, LlmError> {
        let input = self
            .input
            .ok_or_else(|| LlmError::invalid_request("Prompt input must be specified"))?;

        let mut request = PromptRequest::new(input);
        request.provider = self.provider;

        self.client
            .send_prompt(self.client.build_request(request))
            .await?
            .into_outcome()
    }
}

impl CalypsoClient {
    /// Start building a prompt request
    pub fn prompt_builder(&self) -> PromptBuilder<'_> {
        PromptBuilder::new(self)
    }
}
