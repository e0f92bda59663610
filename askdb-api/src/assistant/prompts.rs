use askdb_tools::{QueryOutcome, SchemaDescription};

/// Prompt asking the model to turn a question into SQL for the given schema
pub fn generation_prompt(schema: &SchemaDescription, question: &str) -> String {
    format!(
        r#"You are an AI assistant that converts natural language into SQL queries.

Database Schema:
{schema}

User Query: "{question}"

Provide a SQL query that matches the user's request inside a ```sql fenced code block. If it is not clear how to convert it to an SQL query than say "not possible"."#,
        schema = schema.render(),
        question = question,
    )
}

/// Prompt asking the model to explain a query result in plain language
pub fn summary_prompt(question: &str, sql: &str, outcome: &QueryOutcome) -> String {
    format!(
        r#"You are a helpful assistant.

The user asked: "{question}".

This was the SQL query executed:
{sql}

This is the result of the SQL query as a list of tuples:
{data}

Based on the user's question and the result, write a clear, human-readable response.

If the result contains employee names and salaries, return something like:
- Diana Prince earns $85,000
- Clark Kent earns $95,000
- Bruce Wayne earns $150,000

Avoid combining names/salaries in a sentence. Format cleanly, one item per line."#,
        question = question,
        sql = sql,
        data = outcome.to_prompt_text(),
    )
}
