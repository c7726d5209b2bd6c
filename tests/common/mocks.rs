//! Mock implementations shared by the integration tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use polish::llm::{LLMClient, LLMResponse};
use polish::shell::GatewayClient;
use polish::types::{AppError, CompletionRequest, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock provider that records every `(system, prompt)` pair it receives.
#[derive(Clone)]
pub struct MockLLMClient {
    response: Option<String>,
    should_fail: bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockLLMClient {
    /// Replies with `response`
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            should_fail: false,
            calls: Arc::default(),
        }
    }

    /// Replies with no content at all
    pub fn empty() -> Self {
        Self {
            response: None,
            should_fail: false,
            calls: Arc::default(),
        }
    }

    /// Fails every call with provider detail that must never reach a caller
    pub fn failing() -> Self {
        Self {
            response: None,
            should_fail: true,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn into_provider(self) -> Option<Arc<dyn LLMClient>> {
        Some(Arc::new(self))
    }
}

pub const MOCK_FAILURE_DETAIL: &str = "upstream said: invalid api key sk-test-secret";

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<LLMResponse> {
        self.calls
            .lock()
            .push((system.to_string(), prompt.to_string()));

        if self.should_fail {
            return Err(AppError::Provider(MOCK_FAILURE_DETAIL.to_string()));
        }

        Ok(match &self.response {
            Some(text) => LLMResponse::text(text.clone()),
            None => LLMResponse::empty(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Gateway client with scripted answers and an artificial delay.
///
/// Outcomes are served in order; the last one repeats.
pub struct MockGatewayClient {
    outcomes: Mutex<Vec<std::result::Result<String, String>>>,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockGatewayClient {
    pub fn replying(result: &str) -> Self {
        Self::with_outcome(Ok(result.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()))
    }

    fn with_outcome(outcome: std::result::Result<String, String>) -> Self {
        Self {
            outcomes: Mutex::new(vec![outcome]),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure after the outcomes so far
    pub fn then_failing(self, message: &str) -> Self {
        self.outcomes.lock().push(Err(message.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    fn next_outcome(&self) -> std::result::Result<String, String> {
        let mut outcomes = self.outcomes.lock();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes[0].clone()
        }
    }
}

#[async_trait]
impl GatewayClient for MockGatewayClient {
    async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.next_outcome()
    }
}
