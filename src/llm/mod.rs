//! LLM Provider Client
//!
//! The gateway talks to the completion provider through the [`LLMClient`]
//! trait, so tests can substitute a mock and the server can run with no
//! provider at all when the credential is missing.
//!
//! # Provider
//!
//! [`OpenAIClient`] speaks the OpenAI chat-completions protocol over
//! `reqwest`. Any compatible endpoint works by pointing `provider.api_base`
//! at it.
//!
//! # Example
//!
//! ```ignore
//! use polish::llm::{LLMClient, OpenAIClient};
//!
//! let settings = config.provider_settings();
//! let client = OpenAIClient::new("sk-...".to_string(), &settings)?;
//!
//! let response = client
//!     .generate_with_system("You rewrite text.", "fix this pls")
//!     .await?;
//! println!("{:?}", response.content);
//! ```

/// Core LLM client trait and response types.
pub mod client;
/// OpenAI chat-completions client.
pub mod openai;

pub use client::{LLMClient, LLMResponse};
pub use openai::OpenAIClient;
