use askdb_llm_sdk::calypso::CalypsoClient;
use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::error::LlmError;
use askdb_llm_sdk::types::{PromptOutcome, PromptRequest};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::Server) -> CalypsoClient {
    CalypsoClient::new("test-key")
        .unwrap()
        .with_base_url(server.url())
}

#[tokio::test]
async fn test_cleared_prompt_returns_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/prompts")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "input": "How many employees?",
            "provider": "gpt-4o-mini",
            "verify": false,
            "verbose": "true",
            "externalMetadata": {"any_data": "testing testing 123", "user_id": "1234"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": {"outcome": "cleared", "response": "There are 3."}}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = client_for(&server)
        .complete(PromptRequest::new("How many employees?"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PromptOutcome::Cleared {
            response: "There are 3.".to_string()
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blocked_prompt_returns_outcome_label() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/prompts")
        .with_status(200)
        .with_body(r#"{"result": {"outcome": "blocked", "response": null}}"#)
        .create_async()
        .await;

    let outcome = client_for(&server)
        .complete(PromptRequest::new("drop every table"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PromptOutcome::Blocked {
            outcome: "blocked".to_string()
        }
    );
}

#[tokio::test]
async fn test_provider_override_is_forwarded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/prompts")
        .match_body(Matcher::PartialJson(json!({"provider": "claude-3-haiku"})))
        .with_status(200)
        .with_body(r#"{"result": {"outcome": "cleared", "response": "ok"}}"#)
        .create_async()
        .await;

    let outcome = client_for(&server)
        .prompt_builder()
        .input("hello")
        .provider("claude-3-haiku")
        .send()
        .await
        .unwrap();

    assert_eq!(outcome.text(), Some("ok"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/prompts")
        .with_status(401)
        .with_body(r#"{"message": "invalid token"}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .complete(PromptRequest::new("hello"))
        .await;

    match result {
        Err(LlmError::Authentication { message }) => assert_eq!(message, "invalid token"),
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/prompts")
        .with_status(429)
        .with_header("retry-after", "30")
        .with_body("too many requests")
        .create_async()
        .await;

    let result = client_for(&server)
        .complete(PromptRequest::new("hello"))
        .await;

    match result {
        Err(LlmError::RateLimit { retry_after, .. }) => assert_eq!(retry_after, Some(30)),
        other => panic!("Expected rate limit error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/prompts")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let result = client_for(&server)
        .complete(PromptRequest::new("hello"))
        .await;

    match result {
        Err(LlmError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/prompts")
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .complete(PromptRequest::new("hello"))
        .await;

    assert!(matches!(result, Err(LlmError::Parse { .. })));
}

// Requires CALYPSO_API_KEY environment variable
// Run with: CALYPSO_API_KEY=... cargo test --test calypso_mock_server -- --ignored
#[tokio::test]
#[ignore]
async fn test_real_api_call() {
    let api_key = match std::env::var("CALYPSO_API_KEY") {
        Ok(key) => key,
        Err(_) => panic!("Skipping integration test - CALYPSO_API_KEY not set"),
    };

    let client = CalypsoClient::new(api_key).unwrap();
    let outcome = client
        .complete(PromptRequest::new("Say 'Hello, World!' and nothing else."))
        .await
        .unwrap();

    assert!(outcome.text().unwrap_or_default().contains("Hello"));
}
