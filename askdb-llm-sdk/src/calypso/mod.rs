//! CalypsoAI prompt gateway client implementation

pub mod builder;
pub mod client;
pub mod types;

pub use builder::PromptBuilder;
pub use client::CalypsoClient;
