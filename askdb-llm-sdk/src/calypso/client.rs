use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use crate::{
    calypso::types::{
        CalypsoPromptRequest, CalypsoPromptResponse, ExternalMetadata, CLEARED_OUTCOME,
    },
    error::LlmError,
    types::{PromptOutcome, PromptRequest},
};

/// Default CalypsoAI backend (US1 region)
pub const DEFAULT_BASE_URL: &str = "https://www.us1.calypsoai.app/backend/v1";

/// CalypsoAI prompt gateway client
pub struct CalypsoClient {
    api_key: String,
    base_url: String,
    provider: String,
    metadata: ExternalMetadata,
    http_client: reqwest::Client,
}

impl CalypsoClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            provider: crate::providers::DEFAULT_PROVIDER.to_string(),
            metadata: ExternalMetadata::default(),
            http_client: build_http_client(Duration::from_secs(300))?,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default provider id forwarded with every prompt
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Rebuild the HTTP client with a different request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.http_client = build_http_client(timeout)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a prompt to the `/prompts` endpoint
    pub async fn send_prompt(
        &self,
        request: CalypsoPromptRequest,
    ) -> Result<CalypsoPromptResponse, LlmError> {
        let url = format!("{}/prompts", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if status.is_success() {
            tracing::info!(status = status.as_u16(), provider = %request.provider, "Prompt sent successfully");
            let body = response
                .text()
                .await
                .map_err(|e| LlmError::Network { source: e })?;
            let parsed: CalypsoPromptResponse = serde_json::from_str(&body)?;
            Ok(parsed)
        } else {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!(status = status.as_u16(), body = %error_text, "Prompt gateway returned an error");

            let message = error_message(&error_text);
            match status {
                reqwest::StatusCode::BAD_REQUEST => Err(LlmError::invalid_request(message)),
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    Err(LlmError::authentication(message))
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    Err(LlmError::rate_limit(message, retry_after))
                }
                _ => Err(LlmError::api_error(status.as_u16(), message)),
            }
        }
    }

    /// Build the wire request for a prompt, filling in client defaults
    pub fn build_request(&self, request: PromptRequest) -> CalypsoPromptRequest {
        CalypsoPromptRequest {
            input: request.input,
            provider: request.provider.unwrap_or_else(|| self.provider.clone()),
            verify: false,
            verbose: "true".to_string(),
            external_metadata: self.metadata.clone(),
        }
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Network { source: e })
}

/// Pull a human-readable message out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("message"))
                .or_else(|| value.get("error"))
                .or_else(|| value.get("detail"))
        })
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| body.to_string())
}

impl CalypsoPromptResponse {
    /// Convert the raw scan result into a typed outcome
    pub fn into_outcome(self) -> Result<PromptOutcome, LlmError> {
        let result = self.result;
        if result.outcome == CLEARED_OUTCOME {
            let response = result.response.ok_or_else(|| {
                LlmError::invalid_response("cleared outcome did not include a response")
            })?;
            Ok(PromptOutcome::Cleared { response })
        } else {
            Ok(PromptOutcome::Blocked {
                outcome: result.outcome,
            })
        }
    }
}

#[async_trait]
impl crate::client::LlmClient for CalypsoClient {
    async fn complete(&self, request: PromptRequest) -> Result<PromptOutcome, LlmError> {
        let calypso_request = self.build_request(request);
        let outcome = self.send_prompt(calypso_request).await?.into_outcome()?;

        if let PromptOutcome::Blocked { outcome: label } = &outcome {
            tracing::info!(outcome = %label, "Prompt was not cleared by the gateway");
        }

        Ok(outcome)
    }

    fn provider_name(&self) -> &str {
        crate::providers::CALYPSO
    }

    fn model_name(&self) -> &str {
        &self.provider
    }
}
