use serde::{Deserialize, Serialize};

/// Gateway-agnostic prompt request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Prompt text sent verbatim
    pub input: String,
    /// Provider id override; the client's default is used when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl PromptRequest {
    /// Create a request using the client's default provider
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self {
            input: input.into(),
            provider: None,
        }
    }

    /// Route the request to a specific provider
    pub fn with_provider<S: Into<String>>(mut self, provider: S) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// What the gateway decided about a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromptOutcome {
    /// Content passed the gateway's scanners; carries the provider output
    Cleared { response: String },
    /// Any other outcome (blocked, flagged, ...); carries the raw outcome label
    Blocked { outcome: String },
}

impl PromptOutcome {
    /// Provider output if the prompt was cleared
    pub fn text(&self) -> Option<&str> {
        match self {
            PromptOutcome::Cleared { response } => Some(response),
            PromptOutcome::Blocked { .. } => None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, PromptOutcome::Cleared { .. })
    }
}
