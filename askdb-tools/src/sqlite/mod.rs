//! SQLite access for the assistant
//!
//! Every operation opens its own connection and drops it before returning, so no
//! handle outlives a single introspection or query.
//!
//! - [`introspect_schema`] reads table and column names from the catalog.
//! - [`executor`] runs generated statements and reports rows or a textual error.
//! - [`fixture`] creates and seeds the sample database.

use crate::tool_error::ToolError;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod executor;
pub mod fixture;

pub use executor::{execute_sql, QueryOutcome, QueryResult, SqlExecutor};
pub use fixture::{create_sample_database, ensure_database};

/// Columns of one user table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

/// Table name to column names, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    tables: Vec<TableSchema>,
}

impl SchemaDescription {
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Columns for a table, if it exists
    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.columns.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// One `Table <name>: <col>, <col>` line per table, as embedded in prompts
    pub fn render(&self) -> String {
        self.tables
            .iter()
            .map(|t| format!("Table {}: {}", t.name, t.columns.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Read the user tables and their columns from an existing database file.
///
/// The file is never created here; a missing path is an error.
pub fn introspect_schema(db_path: &Path) -> Result<SchemaDescription, ToolError> {
    validate_db_path(db_path)?;

    let conn = Connection::open_with_flags(
        executor::plain_filename(db_path),
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| ToolError::ExecutionError(format!("Failed to open database: {}", e)))?;

    let table_names: Vec<String> = {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        names
    };

    let mut tables = Vec::with_capacity(table_names.len());
    {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        for name in table_names {
            let columns = stmt
                .query_map([&name], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            tables.push(TableSchema { name, columns });
        }
    }

    tracing::debug!(
        db_path = %db_path.display(),
        table_count = tables.len(),
        "Introspected database schema"
    );

    Ok(SchemaDescription { tables })
}

pub(crate) fn validate_db_path(db_path: &Path) -> Result<(), ToolError> {
    if db_path.as_os_str().is_empty() {
        return Err(ToolError::InvalidInput(
            "Database path cannot be empty".to_string(),
        ));
    }

    if !db_path.exists() {
        return Err(ToolError::InvalidInput(format!(
            "Database file not found: {}",
            db_path.display()
        )));
    }

    if !db_path.is_file() {
        return Err(ToolError::InvalidInput(format!(
            "Path is not a file: {}",
            db_path.display()
        )));
    }

    Ok(())
}
