//! Statement execution against the sample database
//!
//! Generated SQL is run as-is. Read queries (anything starting with `SELECT`) return
//! their full result set; every other statement is stepped to completion and committed
//! by SQLite's autocommit. Database errors never escape: they come back as
//! [`QueryOutcome::Failed`] with an `Error:` prefixed message.
//!
//! With [`SqlExecutor::read_only`] the connection is opened with
//! `SQLITE_OPEN_READ_ONLY`, so writes are rejected by SQLite itself.

use crate::extract::{is_blank_statement, strip_fences};
use rusqlite::{types::ValueRef, Connection, OpenFlags};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Message returned for statements that do not produce rows
pub const EXECUTED_MESSAGE: &str = "Query executed successfully.";

const BUSY_TIMEOUT_MS: u64 = 5000;

/// Rows returned by a read query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows as a JSON array of arrays, one inner array per row
    pub fn to_json_rows(&self) -> String {
        serde_json::to_string(&self.rows).unwrap_or_else(|_| "[]".to_string())
    }
}

/// What running a statement produced
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(QueryResult),
    Executed { message: String },
    Failed { message: String },
}

impl QueryOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, QueryOutcome::Failed { .. })
    }

    /// Result data as text for prompts: JSON rows, or the status/error message
    pub fn to_prompt_text(&self) -> String {
        match self {
            QueryOutcome::Rows(result) => result.to_json_rows(),
            QueryOutcome::Executed { message } | QueryOutcome::Failed { message } => {
                serde_json::to_string(message).unwrap_or_else(|_| message.clone())
            }
        }
    }
}

/// Runs statements against one database file, one connection per statement
#[derive(Debug, Clone)]
pub struct SqlExecutor {
    db_path: PathBuf,
    read_only: bool,
}

impl SqlExecutor {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            read_only: false,
        }
    }

    /// Open connections read-only so write statements fail
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run a statement. Never fails; database errors become [`QueryOutcome::Failed`].
    pub fn execute(&self, sql: &str) -> QueryOutcome {
        let sql = strip_fences(sql);
        if is_blank_statement(&sql) {
            tracing::debug!("Blank statement, nothing to run");
            return QueryOutcome::Executed {
                message: EXECUTED_MESSAGE.to_string(),
            };
        }

        match self.run(&sql) {
            Ok(outcome) => {
                if let QueryOutcome::Rows(result) = &outcome {
                    tracing::debug!(sql = %sql, row_count = result.row_count(), "Query returned rows");
                } else {
                    tracing::debug!(sql = %sql, "Statement executed");
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(sql = %sql, error = %e, "Statement failed");
                QueryOutcome::Failed {
                    message: format!("Error: {}", e),
                }
            }
        }
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let mode = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
        };
        let conn = Connection::open_with_flags(
            plain_filename(&self.db_path),
            mode | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    fn run(&self, sql: &str) -> rusqlite::Result<QueryOutcome> {
        // The connection is dropped (and closed) when this function returns, on every path.
        let conn = self.open()?;
        let mut stmt = conn.prepare(sql)?;

        if is_read_query(sql) {
            let columns: Vec<String> = stmt
                .column_names()
                .iter()
                .map(|&name| name.to_string())
                .collect();

            let rows = stmt
                .query_map([], |row| {
                    let mut values = Vec::with_capacity(columns.len());
                    for i in 0..columns.len() {
                        values.push(to_json_value(row.get_ref(i)?));
                    }
                    Ok(values)
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(QueryOutcome::Rows(QueryResult { columns, rows }))
        } else {
            let mut rows = stmt.raw_query();
            while rows.next()?.is_some() {}

            Ok(QueryOutcome::Executed {
                message: EXECUTED_MESSAGE.to_string(),
            })
        }
    }
}

/// Run a statement with a read-write executor.
pub fn execute_sql(db_path: &Path, sql: &str) -> QueryOutcome {
    SqlExecutor::new(db_path).execute(sql)
}

/// SQLite reads names starting with `file:` as URIs when built with URI support
pub(crate) fn plain_filename(path: &Path) -> PathBuf {
    if path.to_string_lossy().starts_with("file:") {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

fn is_read_query(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select"))
}

fn to_json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(serde_json::Number::from(i)),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(s) => Value::String(String::from_utf8_lossy(s).to_string()),
        ValueRef::Blob(_) => Value::String("<BLOB>".to_string()),
    }
}
