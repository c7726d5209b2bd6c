//! Gateway client used by the shell

use crate::types::{
    AgentInfo, AgentsListResponse, CompletionRequest, CompletionResponse, ErrorResponse,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and retry.";
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to generate response. Please try again.";

/// Sends one completion request to a gateway
///
/// Errors are already user-facing messages.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, String>;
}

/// [`GatewayClient`] over HTTP against a running server
#[derive(Clone)]
pub struct HttpGatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn agents_url(&self) -> String {
        format!("{}/api/agents", self.base_url)
    }

    /// Fetch the agent list the server advertises
    pub async fn list_agents(&self) -> Result<Vec<AgentInfo>, String> {
        let resp = self
            .http
            .get(self.agents_url())
            .send()
            .await
            .map_err(|_| NETWORK_ERROR_MESSAGE.to_string())?;

        if !resp.status().is_success() {
            return Err(error_message(resp).await);
        }

        resp.json::<AgentsListResponse>()
            .await
            .map(|list| list.agents)
            .map_err(|_| NETWORK_ERROR_MESSAGE.to_string())
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, String> {
        let resp = self
            .http
            .post(self.agents_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "gateway request failed");
                NETWORK_ERROR_MESSAGE.to_string()
            })?;

        if !resp.status().is_success() {
            return Err(error_message(resp).await);
        }

        resp.json::<CompletionResponse>()
            .await
            .map(|body| body.result)
            .map_err(|e| {
                debug!(error = %e, "undecodable gateway response");
                NETWORK_ERROR_MESSAGE.to_string()
            })
    }
}

async fn error_message(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorResponse>().await {
        Ok(body) if !body.error.trim().is_empty() => body.error,
        _ => {
            debug!(%status, "gateway error without message");
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}
