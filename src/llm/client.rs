use crate::types::Result;
use async_trait::async_trait;

/// Completion provider abstraction
///
/// One call per request: a system prompt and a user message in, the first
/// candidate completion out.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<LLMResponse>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Response from an LLM generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LLMResponse {
    /// Text of the first choice, if the provider returned any
    pub content: Option<String>,
    /// The reason generation stopped (e.g., "stop", "length")
    pub finish_reason: Option<String>,
}

impl LLMResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            finish_reason: Some("stop".to_string()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
