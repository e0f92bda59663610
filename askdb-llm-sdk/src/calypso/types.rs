use serde::{Deserialize, Serialize};

/// Outcome label the gateway uses for prompts that passed its scanners
pub const CLEARED_OUTCOME: &str = "cleared";

/// Request body for `POST /prompts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalypsoPromptRequest {
    /// Prompt text
    pub input: String,
    /// Provider the gateway forwards the prompt to
    pub provider: String,
    /// Whether the gateway should run verification scanners
    pub verify: bool,
    /// Verbose flag; the gateway expects the string form
    pub verbose: String,
    /// Free-form metadata attached to the prompt record
    pub external_metadata: ExternalMetadata,
}

/// Metadata the gateway stores alongside each prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMetadata {
    pub any_data: String,
    pub user_id: String,
}

impl Default for ExternalMetadata {
    fn default() -> Self {
        Self {
            any_data: "testing testing 123".to_string(),
            user_id: "1234".to_string(),
        }
    }
}

/// Response body for `POST /prompts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalypsoPromptResponse {
    pub result: CalypsoResult,
}

/// Scan result for a single prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalypsoResult {
    /// "cleared", "blocked", "flagged", ...
    pub outcome: String,
    /// Provider output; absent when the prompt never reached the provider
    #[serde(default)]
    pub response: Option<String>,
}
