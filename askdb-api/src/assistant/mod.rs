//! Question-to-answer pipeline
//!
//! One request walks through: moderation probe, schema-aware SQL generation,
//! execution, summarization. A blocked probe ends the request immediately; a
//! statement that fails to execute is reported without a summary.

use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::error::LlmError;
use askdb_llm_sdk::types::{PromptOutcome, PromptRequest};
use askdb_tools::{
    interpret_generation, introspect_schema, QueryOutcome, SqlExecutor, SqlGeneration, ToolError,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub mod prompts;

/// Text shown when the gateway refuses a question
pub const REFUSAL_MESSAGE: &str = "That type of question is not allowed";

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("Question cannot be empty")]
    EmptyQuestion,
    #[error(transparent)]
    Gateway(#[from] LlmError),
    #[error("{0}")]
    Extraction(ToolError),
    #[error("Failed to read database schema: {0}")]
    Schema(ToolError),
}

/// Final result of one question
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Refused,
    Sql { sql: String, summary: String },
    SqlFailed { sql: String, error: String },
    NotSql { input: String, summary: String },
}

impl Answer {
    pub fn kind(&self) -> &'static str {
        match self {
            Answer::Refused => "refused",
            Answer::Sql { .. } => "sql",
            Answer::SqlFailed { .. } => "sql_failed",
            Answer::NotSql { .. } => "not_sql",
        }
    }

    /// The statement that was run, if any
    pub fn sql(&self) -> Option<&str> {
        match self {
            Answer::Sql { sql, .. } | Answer::SqlFailed { sql, .. } => Some(sql),
            _ => None,
        }
    }

    /// Markdown message shown to the user
    pub fn render(&self) -> String {
        match self {
            Answer::Refused => REFUSAL_MESSAGE.to_string(),
            Answer::Sql { sql, summary } => format!(
                "**Generated SQL:**\n```sql\n{}\n```\n\n**Answer:**\n{}",
                sql, summary
            ),
            Answer::SqlFailed { sql, error } => format!(
                "**Generated SQL:**\n```sql\n{}\n```\n\n❌ **Error executing SQL:**\n{}",
                sql, error
            ),
            Answer::NotSql { input, summary } => format!(
                "**Not an SQL Query type question:**\n```sql\n{}\n```\n\n**Answer:**\n{}",
                input, summary
            ),
        }
    }
}

pub struct Assistant {
    client: Arc<dyn LlmClient>,
    executor: SqlExecutor,
    // Held for a whole request so submissions run one at a time
    pipeline: Mutex<()>,
}

impl Assistant {
    pub fn new(client: Arc<dyn LlmClient>, executor: SqlExecutor) -> Self {
        Self {
            client,
            executor,
            pipeline: Mutex::new(()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.executor.db_path()
    }

    /// Answer a question. The text goes to the gateway exactly as given.
    pub async fn answer(&self, question: &str) -> Result<Answer, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        let _guard = self.pipeline.lock().await;

        let probe = self.client.complete(PromptRequest::new(question)).await?;
        if !probe.is_cleared() {
            info!(question = %question, "Question refused by moderation probe");
            return Ok(Answer::Refused);
        }

        let schema = introspect_schema(self.db_path()).map_err(AskError::Schema)?;
        let generation = self
            .ask_model(prompts::generation_prompt(&schema, question))
            .await?;

        match interpret_generation(&generation).map_err(AskError::Extraction)? {
            SqlGeneration::Statement(sql) => {
                debug!(sql = %sql, "Generated SQL");

                let outcome = self.executor.execute(&sql);
                if let QueryOutcome::Failed { message } = outcome {
                    return Ok(Answer::SqlFailed {
                        sql,
                        error: message,
                    });
                }

                let summary = self
                    .ask_model(prompts::summary_prompt(question, &sql, &outcome))
                    .await?;
                Ok(Answer::Sql { sql, summary })
            }
            SqlGeneration::NotSql => {
                debug!(question = %question, "Question does not map to SQL");

                let summary = self.ask_model(question.to_string()).await?;
                Ok(Answer::NotSql {
                    input: question.to_string(),
                    summary,
                })
            }
        }
    }

    /// Send a prompt; a blocked outcome reads as the refusal text
    async fn ask_model(&self, prompt: String) -> Result<String, AskError> {
        match self.client.complete(PromptRequest::new(prompt)).await? {
            PromptOutcome::Cleared { response } => Ok(response),
            PromptOutcome::Blocked { outcome } => {
                info!(outcome = %outcome, "Prompt blocked by gateway");
                Ok(REFUSAL_MESSAGE.to_string())
            }
        }
    }
}
