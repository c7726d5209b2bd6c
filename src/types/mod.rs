use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Body of `POST /api/agents`. Unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompletionRequest {
    /// Id of the agent whose system prompt conditions the rewrite
    pub agent_id: String,
    /// Free text to rewrite
    pub input: String,
}

impl CompletionRequest {
    pub fn new(agent_id: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            input: input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompletionResponse {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ============= Agent Types =============

/// Public view of an agent definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentsListResponse {
    pub agents: Vec<AgentInfo>,
}

// ============= Error Types =============

/// Errors produced while serving a request.
///
/// The `Display` text carries internal detail and is meant for logs. What the
/// caller sees is [`AppError::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing required field")]
    MissingField,

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Holds the name of the environment variable that should carry the credential
    #[error("Provider credential not configured: {0} is unset")]
    ProviderUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) | AppError::MissingField => StatusCode::BAD_REQUEST,
            AppError::UnknownAgent(_) => StatusCode::NOT_FOUND,
            AppError::ProviderUnavailable(_)
            | AppError::Provider(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidPayload(_) => "Invalid JSON payload.".to_string(),
            AppError::MissingField => "Both agentId and input are required.".to_string(),
            AppError::UnknownAgent(_) => "Unknown agent.".to_string(),
            AppError::ProviderUnavailable(env) => {
                format!("Missing {}. Please configure the environment variable.", env)
            }
            AppError::Provider(_) => "Unable to reach OpenAI. Please try again later.".to_string(),
            AppError::Configuration(_) | AppError::Internal(_) => {
                "Internal server error.".to_string()
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status(), axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
