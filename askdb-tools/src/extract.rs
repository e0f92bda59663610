//! Recovering SQL from free-text model output
//!
//! Models answer with prose around a fenced block:
//!
//! ````text
//! Here is the query:
//! ```sql
//! SELECT name, salary FROM employees
//! ```
//! ````
//!
//! [`extract_sql`] pulls the interior of the first `sql` block. [`interpret_generation`]
//! turns a whole generation response into a typed [`SqlGeneration`] so callers branch on
//! a value instead of searching the text themselves.

use crate::tool_error::ToolError;
use regex::Regex;
use std::sync::OnceLock;

/// Result of interpreting a SQL generation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlGeneration {
    /// The model produced a statement to run
    Statement(String),
    /// The model did not map the question to SQL
    NotSql,
}

fn sql_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```sql\n(.*?)\n```").expect("SQL block pattern is a valid regex")
    })
}

/// Return the trimmed body of the first ```` ```sql ```` fenced block.
pub fn extract_sql(response: &str) -> Result<String, ToolError> {
    sql_block_pattern()
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(ToolError::NoSqlBlock)
}

/// Classify a generation response.
///
/// A fenced `sql` block always wins. Without one, a response that still mentions
/// `SELECT` is treated as malformed output and reported as [`ToolError::NoSqlBlock`];
/// anything else (including the model's "not possible") is [`SqlGeneration::NotSql`].
pub fn interpret_generation(response: &str) -> Result<SqlGeneration, ToolError> {
    let response = response.trim();

    match extract_sql(response) {
        Ok(sql) if !is_blank_statement(&sql) => Ok(SqlGeneration::Statement(sql)),
        // An empty block counts as no block at all
        Ok(_) | Err(ToolError::NoSqlBlock) if response.contains("SELECT") => {
            Err(ToolError::NoSqlBlock)
        }
        Ok(_) | Err(ToolError::NoSqlBlock) => Ok(SqlGeneration::NotSql),
        Err(e) => Err(e),
    }
}

/// True when a statement holds nothing but whitespace, comments and semicolons.
pub fn is_blank_statement(sql: &str) -> bool {
    let mut rest = sql;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return true;
        }
        if let Some(tail) = rest.strip_prefix("--") {
            rest = tail.split_once('\n').map_or("", |(_, after)| after);
        } else if let Some(tail) = rest.strip_prefix("/*") {
            rest = tail.split_once("*/").map_or("", |(_, after)| after);
        } else if let Some(tail) = rest.strip_prefix(';') {
            rest = tail;
        } else {
            return false;
        }
    }
}

/// Remove leftover markdown fences and surrounding whitespace from a statement.
pub fn strip_fences(sql: &str) -> String {
    let mut sql = sql.trim();
    if let Some(rest) = sql.strip_prefix("```sql") {
        sql = rest;
    } else if let Some(rest) = sql.strip_prefix("```") {
        sql = rest;
    }
    if let Some(rest) = sql.strip_suffix("```") {
        sql = rest;
    }
    sql.trim().to_string()
}
