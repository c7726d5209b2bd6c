//! # Polish - agent-based text rewriting
//!
//! A small server that rewrites free text in the voice of a selected
//! "agent": a predefined persona with its own system prompt. The user's text
//! and the agent's prompt are forwarded to an OpenAI-compatible chat
//! completion endpoint and the rewritten text is relayed back.
//!
//! ## Overview
//!
//! Polish can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `polish-server` binary
//! 2. **As a library** - Embed the registry, gateway or client shell
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use polish::{AgentRegistry, CompletionGateway, OpenAIClient, PolishConfig};
//! use std::sync::Arc;
//!
//! let config = PolishConfig::load("polish.toml")?;
//! let settings = config.provider_settings();
//! let provider = OpenAIClient::from_settings(&settings)?
//!     .map(|client| Arc::new(client) as Arc<dyn polish::LLMClient>);
//!
//! let gateway = CompletionGateway::new(
//!     Arc::new(AgentRegistry::builtin()),
//!     provider,
//!     settings.api_key_env.clone(),
//! );
//! let response = gateway
//!     .complete(polish::types::CompletionRequest::new("mail", "pls send report"))
//!     .await?;
//! println!("{}", response.result);
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Agent definitions and the read-only registry
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface and terminal front end
//! - [`gateway`] - Request validation and the single provider call
//! - [`llm`] - Completion provider client
//! - [`shell`] - Client-side interaction state machine and gateway client
//! - [`types`] - Wire types and error handling
//! - [`utils`] - Configuration

/// Agent definitions and registry.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface for the `polish-server` binary.
pub mod cli;
/// Completion gateway.
pub mod gateway;
/// LLM provider client and abstractions.
pub mod llm;
/// Client interaction shell.
pub mod shell;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentDefinition, AgentRegistry};
pub use gateway::CompletionGateway;
pub use llm::{LLMClient, LLMResponse, OpenAIClient};
pub use types::{AppError, Result};
pub use utils::toml_config::{PolishConfig, ProviderSettings};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based configuration, fixed at startup
    pub config: Arc<PolishConfig>,
    /// Agent registry
    pub agent_registry: Arc<AgentRegistry>,
    /// Completion gateway
    pub gateway: Arc<CompletionGateway>,
}

impl AppState {
    /// Assemble state around an explicit provider (or none)
    pub fn new(
        config: PolishConfig,
        agent_registry: Arc<AgentRegistry>,
        provider: Option<Arc<dyn LLMClient>>,
    ) -> Self {
        let gateway = CompletionGateway::new(
            Arc::clone(&agent_registry),
            provider,
            config.provider.api_key_env.clone(),
        );

        Self {
            config: Arc::new(config),
            agent_registry,
            gateway: Arc::new(gateway),
        }
    }

    /// Assemble state with the built-in agents and the OpenAI client
    /// described by `config`
    pub fn from_config(config: PolishConfig) -> Result<Self> {
        let settings = config.provider_settings();
        let provider = OpenAIClient::from_settings(&settings)?
            .map(|client| Arc::new(client) as Arc<dyn LLMClient>);

        Ok(Self::new(
            config,
            Arc::new(AgentRegistry::builtin()),
            provider,
        ))
    }
}
