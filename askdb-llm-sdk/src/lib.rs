//! # askdb LLM SDK
//!
//! A client for the CalypsoAI prompt gateway. Every prompt goes through the gateway's
//! scanners first; cleared prompts come back with the provider's output, everything
//! else comes back as a blocked outcome.
//!
//! ## Example
//!
//! ```rust,no_run
//! use askdb_llm_sdk::calypso::CalypsoClient;
//! use askdb_llm_sdk::types::PromptOutcome;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CalypsoClient::new("your-calypso-api-key")?;
//!     let outcome = client
//!         .prompt_builder()
//!         .input("Say hello")
//!         .provider("gpt-4o-mini")
//!         .send()
//!         .await?;
//!
//!     match outcome {
//!         PromptOutcome::Cleared { response } => println!("Response: {}", response),
//!         PromptOutcome::Blocked { outcome } => println!("Blocked: {}", outcome),
//!     }
//!     Ok(())
//! }
//! ```

pub mod calypso;
pub mod client;
pub mod error;
pub mod providers;
pub mod types;
