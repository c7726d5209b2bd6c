//! Completion Gateway
//!
//! Mediates between callers and the completion provider. Each call is
//! independent: validate the request, resolve the agent, make exactly one
//! provider call, shape the result. No retries, no caching, no shared mutable
//! state, so a single gateway behind an `Arc` serves any number of concurrent
//! callers.
//!
//! Validation runs in a fixed order and stops at the first failure:
//!
//! 1. the body parses as `{agentId, input}` ([`AppError::InvalidPayload`])
//! 2. both fields are non-empty after trimming ([`AppError::MissingField`])
//! 3. the agent exists ([`AppError::UnknownAgent`])
//! 4. a provider is configured ([`AppError::ProviderUnavailable`])

use crate::agents::AgentRegistry;
use crate::llm::LLMClient;
use crate::types::{AppError, CompletionRequest, CompletionResponse, Result};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Returned in place of an empty completion
pub const EMPTY_COMPLETION_FALLBACK: &str = "The model did not return any content.";

pub struct CompletionGateway {
    registry: Arc<AgentRegistry>,
    provider: Option<Arc<dyn LLMClient>>,
    credential_env: String,
}

impl CompletionGateway {
    /// Create a gateway
    ///
    /// `provider` is `None` when no credential is configured; requests then
    /// fail with [`AppError::ProviderUnavailable`] naming `credential_env`.
    pub fn new(
        registry: Arc<AgentRegistry>,
        provider: Option<Arc<dyn LLMClient>>,
        credential_env: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            provider,
            credential_env: credential_env.into(),
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn is_provider_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Parse a raw request body against the request schema
    ///
    /// Only a JSON object is accepted, never the positional
    /// `["agentId", "input"]` sequence form.
    pub fn parse_request(body: &[u8]) -> Result<CompletionRequest> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))?;
        if !value.is_object() {
            return Err(AppError::InvalidPayload(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }

    /// Parse and complete a raw request body
    pub async fn complete_raw(&self, body: &[u8]) -> Result<CompletionResponse> {
        let request = Self::parse_request(body).inspect_err(|e| {
            debug!(error = %e, "rejected completion request");
        })?;
        self.complete(request).await
    }

    pub async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let agent_id = request.agent_id.trim();
        let input = request.input.trim();

        if agent_id.is_empty() || input.is_empty() {
            debug!("rejected completion request: missing agentId or input");
            return Err(AppError::MissingField);
        }

        let agent = self.registry.find_by_id(agent_id).ok_or_else(|| {
            debug!(agent = agent_id, "rejected completion request: unknown agent");
            AppError::UnknownAgent(agent_id.to_string())
        })?;

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AppError::ProviderUnavailable(self.credential_env.clone()))?;

        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            agent = %agent.id,
            model = provider.model_name(),
            input_chars = input.chars().count(),
            "dispatching completion"
        );

        let response = provider
            .generate_with_system(&agent.prompt, input)
            .await
            .inspect_err(|e| {
                error!(%request_id, agent = %agent.id, error = %e, "completion provider call failed");
            })
            .map_err(|e| match e {
                AppError::Provider(_) => e,
                other => AppError::Provider(other.to_string()),
            })?;

        let result = response
            .content
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(EMPTY_COMPLETION_FALLBACK)
            .to_string();

        debug!(
            %request_id,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "completion finished"
        );

        Ok(CompletionResponse { result })
    }
}
