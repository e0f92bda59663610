#![allow(dead_code)]

use actix_web::{test, web, App};
use askdb_api::assistant::Assistant;
use askdb_api::handlers;
use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::error::LlmError;
use askdb_llm_sdk::types::{PromptOutcome, PromptRequest};
use askdb_tools::{ensure_database, execute_sql, QueryOutcome, SqlExecutor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Gateway stand-in that replays scripted outcomes and records every prompt
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<Result<PromptOutcome, LlmError>>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    pub fn with_responses(responses: Vec<Result<PromptOutcome, LlmError>>) -> Self {
        MockLlmClient {
            responses: Arc::new(Mutex::new(responses)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: PromptRequest) -> Result<PromptOutcome, LlmError> {
        self.prompts.lock().unwrap().push(request.input);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(cleared("There are 3 employees in the database."))
        } else {
            responses.remove(0)
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn cleared(text: &str) -> PromptOutcome {
    PromptOutcome::Cleared {
        response: text.to_string(),
    }
}

pub fn blocked() -> PromptOutcome {
    PromptOutcome::Blocked {
        outcome: "blocked".to_string(),
    }
}

/// Seeded sample database in a temp directory; keep the `TempDir` alive
pub fn setup_sample_db() -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = ensure_database(&dir.path().join("database.db"))?;
    Ok((dir, path))
}

pub fn employee_count(db_path: &Path) -> u64 {
    match execute_sql(db_path, "SELECT COUNT(*) FROM employees") {
        QueryOutcome::Rows(result) => result.rows[0][0].as_u64().unwrap(),
        other => panic!("Expected rows, got {:?}", other),
    }
}

pub fn create_assistant(
    mock: &Arc<MockLlmClient>,
    db_path: PathBuf,
    read_only: bool,
) -> Assistant {
    let client = mock.clone() as Arc<dyn LlmClient>;
    Assistant::new(client, SqlExecutor::new(db_path).read_only(read_only))
}

pub async fn setup_test_app(
    mock: &Arc<MockLlmClient>,
    db_path: PathBuf,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let assistant = web::Data::new(create_assistant(mock, db_path, false));

    test::init_service(
        App::new()
            .app_data(assistant)
            .configure(handlers::configure),
    )
    .await
}
