pub mod extract;
pub mod sqlite;
pub mod tool_error;

pub use extract::{extract_sql, interpret_generation, strip_fences, SqlGeneration};
pub use sqlite::{
    create_sample_database, ensure_database, execute_sql, introspect_schema, QueryOutcome,
    QueryResult, SchemaDescription, SqlExecutor, TableSchema,
};
pub use tool_error::ToolError;
