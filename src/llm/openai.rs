use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, Result};
use crate::utils::toml_config::ProviderSettings;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

/// Client for an OpenAI-compatible chat completions API
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIClient {
    /// Create a client from resolved provider settings
    ///
    /// The settings' timeout bounds each request end to end.
    pub fn new(api_key: String, settings: &ProviderSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.api_base.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(config).with_http_client(http),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Build a client only when the settings carry a credential
    pub fn from_settings(settings: &ProviderSettings) -> Result<Option<Self>> {
        settings
            .api_key
            .clone()
            .map(|key| Self::new(key, settings))
            .transpose()
    }

    fn chat_request(&self, system: &str, prompt: &str) -> Result<CreateChatCompletionRequest> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    prompt.to_string(),
                )),
            ])
            .build()
            .map_err(|e| AppError::Provider(format!("Failed to build request: {}", e)))
    }
}

fn provider_error(e: OpenAIError) -> AppError {
    match e {
        OpenAIError::Reqwest(e) if e.is_timeout() => {
            AppError::Provider(format!("OpenAI request timed out: {}", e))
        }
        other => AppError::Provider(format!("OpenAI API error: {}", other)),
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<LLMResponse> {
        let request = self.chat_request(system, prompt)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(provider_error)?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|choice| LLMResponse {
                content: choice.message.content,
                finish_reason: choice
                    .finish_reason
                    .map(|r| format!("{:?}", r).to_lowercase()),
            })
            .unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
