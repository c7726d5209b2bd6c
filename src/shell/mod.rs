//! Client Interaction Shell
//!
//! Front-end logic independent of any toolkit: agent selection, input
//! editing, one generation at a time against a [`GatewayClient`], copy to a
//! [`Clipboard`] and the inactivity mask. A [`Shell`] can be shared behind an
//! `Arc`; its state lock is never held across an `.await`.

pub mod client;
pub mod clipboard;
pub mod state;

pub use client::{GatewayClient, HttpGatewayClient};
pub use clipboard::{Clipboard, ClipboardError, NoClipboard, Osc52Clipboard};
pub use state::{CopyStatus, GenerationPhase, ShellState, SubmitRejection};

use crate::agents::AgentRegistry;
use crate::types::{AppError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// What a generate trigger led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The gateway answered; holds the trimmed result
    Completed(String),
    /// The gateway call failed; holds the message now shown
    Failed(String),
    /// No call was made
    Rejected(SubmitRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing to copy, or a generation is running
    Unavailable,
}

/// Everything a front end needs to render the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub agent_id: String,
    pub agent_name: String,
    pub placeholder: String,
    pub input: String,
    pub output: String,
    pub error: Option<String>,
    pub phase: GenerationPhase,
    pub copy_status: CopyStatus,
    pub masked: bool,
    pub can_copy: bool,
}

pub struct Shell {
    registry: Arc<AgentRegistry>,
    client: Arc<dyn GatewayClient>,
    clipboard: Arc<dyn Clipboard>,
    state: Mutex<ShellState>,
}

impl Shell {
    /// Create a shell with the registry's default agent selected
    pub fn new(
        registry: Arc<AgentRegistry>,
        client: Arc<dyn GatewayClient>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let state = ShellState::new(registry.default_agent().id.clone());
        Self {
            registry,
            client,
            clipboard,
            state: Mutex::new(state),
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn select_agent(&self, agent_id: &str) -> Result<()> {
        if !self.registry.contains(agent_id) {
            return Err(AppError::UnknownAgent(agent_id.to_string()));
        }
        self.state.lock().select_agent(agent_id, Instant::now());
        Ok(())
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.state.lock().set_input(input, Instant::now());
    }

    /// Append a line to the current input
    pub fn append_line(&self, line: &str) {
        let mut state = self.state.lock();
        let mut input = state.input().to_string();
        if !input.is_empty() {
            input.push('\n');
        }
        input.push_str(line);
        state.set_input(input, Instant::now());
    }

    pub fn touch(&self) {
        self.state.lock().touch(Instant::now());
    }

    /// Run one generation cycle
    pub async fn generate(&self) -> GenerateOutcome {
        let submitted = self.state.lock().begin_submit();
        let request = match submitted {
            Ok(request) => request,
            Err(rejection) => {
                debug!(?rejection, "generate rejected");
                return GenerateOutcome::Rejected(rejection);
            }
        };

        let outcome = self.client.complete(&request).await;

        let mut state = self.state.lock();
        match outcome {
            Ok(result) => {
                state.finish_submit(Ok(result));
                GenerateOutcome::Completed(state.output().to_string())
            }
            Err(message) => {
                state.finish_submit(Err(message.clone()));
                GenerateOutcome::Failed(message)
            }
        }
    }

    /// Copy the current output to the clipboard
    pub fn copy_output(&self) -> std::result::Result<CopyOutcome, ClipboardError> {
        let text = {
            let state = self.state.lock();
            if !state.can_copy() {
                return Ok(CopyOutcome::Unavailable);
            }
            state.output().to_string()
        };

        let written = self.clipboard.write_text(&text);
        let status = match written {
            Ok(()) => CopyStatus::Copied,
            Err(_) => CopyStatus::Failed,
        };
        self.state.lock().mark_copy(status, Instant::now());

        written.map(|_| CopyOutcome::Copied)
    }

    pub fn snapshot(&self) -> ShellState {
        self.state.lock().clone()
    }

    pub fn view(&self) -> ShellView {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> ShellView {
        let state = self.state.lock();
        let agent = self
            .registry
            .find_by_id(state.agent_id())
            .unwrap_or_else(|| self.registry.default_agent());

        ShellView {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            placeholder: agent.placeholder.clone(),
            input: state.input().to_string(),
            output: state.output_display().to_string(),
            error: state.error().map(str::to_string),
            phase: state.phase(),
            copy_status: state.copy_status(now),
            masked: state.is_masked(now),
            can_copy: state.can_copy(),
        }
    }
}
