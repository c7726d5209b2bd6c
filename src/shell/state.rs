//! View state for the client shell.
//!
//! Three independent pieces: the generation state machine held in
//! [`ShellState`], the [`CopyIndicator`] and the [`InactivityMask`]. Every
//! time-dependent method takes `now` explicitly.

use crate::types::CompletionRequest;
use std::time::{Duration, Instant};

pub const IDLE_OUTPUT_MESSAGE: &str = "Waiting for text on the left to generate a polished result.";
pub const GENERATING_MESSAGE: &str = "Generating response with OpenAI...";
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide some text to polish.";

/// How long the copy indicator shows `Copied`/`Failed` before reverting
pub const COPY_RESET_AFTER: Duration = Duration::from_secs(2);
/// Idle time after which non-empty input is masked
pub const MASK_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    /// Whether a new generate may start
    pub fn is_ready(self) -> bool {
        !matches!(self, GenerationPhase::Submitting)
    }
}

/// Why a generate trigger did not produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// A request from this shell is still outstanding
    InFlight,
    /// The input is empty after trimming
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Idle,
    Copied,
    Failed,
}

/// Copy feedback that reverts to `Idle` after [`COPY_RESET_AFTER`]
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    status: CopyStatus,
    changed_at: Option<Instant>,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self {
            status: CopyStatus::Idle,
            changed_at: None,
        }
    }
}

impl CopyIndicator {
    pub fn mark(&mut self, status: CopyStatus, now: Instant) {
        self.status = status;
        self.changed_at = Some(now);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self, now: Instant) -> CopyStatus {
        match self.changed_at {
            Some(at) if now.saturating_duration_since(at) < COPY_RESET_AFTER => self.status,
            _ => CopyStatus::Idle,
        }
    }
}

/// Cosmetic mask over the input field after a period without interaction
#[derive(Debug, Clone, Default)]
pub struct InactivityMask {
    last_activity: Option<Instant>,
}

impl InactivityMask {
    pub fn register_activity(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    pub fn is_visible(&self, input: &str, now: Instant) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        self.last_activity
            .is_some_and(|at| now.saturating_duration_since(at) >= MASK_AFTER)
    }
}

/// State of one shell instance
#[derive(Debug, Clone)]
pub struct ShellState {
    agent_id: String,
    input: String,
    output: String,
    error: Option<String>,
    phase: GenerationPhase,
    copy: CopyIndicator,
    mask: InactivityMask,
}

impl ShellState {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            input: String::new(),
            output: String::new(),
            error: None,
            phase: GenerationPhase::Idle,
            copy: CopyIndicator::default(),
            mask: InactivityMask::default(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last successful result, empty before the first one
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == GenerationPhase::Submitting
    }

    /// Switch agents. Clears the error and copy status; output is kept.
    pub fn select_agent(&mut self, agent_id: impl Into<String>, now: Instant) {
        self.agent_id = agent_id.into();
        self.error = None;
        self.copy.reset();
        self.mask.register_activity(now);
    }

    /// Replace the input text. A shown error is cleared.
    pub fn set_input(&mut self, input: impl Into<String>, now: Instant) {
        self.input = input.into();
        self.error = None;
        self.mask.register_activity(now);
    }

    /// Focus, pointer or key activity that does not change the text
    pub fn touch(&mut self, now: Instant) {
        self.mask.register_activity(now);
    }

    /// Enter `Submitting` and produce the request to send
    pub fn begin_submit(&mut self) -> Result<CompletionRequest, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::InFlight);
        }
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return Err(SubmitRejection::EmptyInput);
        }

        self.phase = GenerationPhase::Submitting;
        self.error = None;
        Ok(CompletionRequest::new(
            self.agent_id.clone(),
            self.input.clone(),
        ))
    }

    /// Leave `Submitting` with the gateway's answer or a user-facing error
    pub fn finish_submit(&mut self, outcome: Result<String, String>) {
        match outcome {
            Ok(result) => {
                self.output = result.trim().to_string();
                self.copy.reset();
                self.phase = GenerationPhase::Succeeded;
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = GenerationPhase::Failed;
            }
        }
    }

    /// Text for the output pane
    pub fn output_display(&self) -> &str {
        if self.is_submitting() {
            GENERATING_MESSAGE
        } else if self.output.is_empty() {
            IDLE_OUTPUT_MESSAGE
        } else {
            &self.output
        }
    }

    pub fn can_copy(&self) -> bool {
        !self.is_submitting() && !self.output.trim().is_empty()
    }

    pub fn mark_copy(&mut self, status: CopyStatus, now: Instant) {
        self.copy.mark(status, now);
    }

    pub fn copy_status(&self, now: Instant) -> CopyStatus {
        self.copy.status(now)
    }

    pub fn is_masked(&self, now: Instant) -> bool {
        self.mask.is_visible(&self.input, now)
    }
}
