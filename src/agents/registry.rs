//! Agent Registry
//!
//! Holds the fixed, ordered list of agents. The registry is built once at
//! startup, wrapped in an `Arc` and shared read-only by the gateway, the API
//! handlers and the client shell. The first entry is the default selection.

use super::builtin::builtin_agents;
use crate::types::{AgentInfo, AppError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// A named persona: system prompt plus presentation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDefinition {
    /// Stable lookup key, also used as the client's selection value
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// One-line summary of what the agent does
    pub description: String,
    /// Sent verbatim as the system message
    pub prompt: String,
    /// Hint text for an empty input field
    pub placeholder: String,
}

impl AgentDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            prompt: prompt.into(),
            placeholder: placeholder.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("id", &self.id),
            ("name", &self.name),
            ("description", &self.description),
            ("prompt", &self.prompt),
            ("placeholder", &self.placeholder),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Configuration(format!(
                    "Agent '{}' has an empty {}",
                    self.id, field
                )));
            }
        }

        Ok(())
    }
}

impl From<&AgentDefinition> for AgentInfo {
    fn from(agent: &AgentDefinition) -> Self {
        AgentInfo {
            id: agent.id.clone(),
            name: agent.name.clone(),
            description: agent.description.clone(),
            prompt: agent.prompt.clone(),
            placeholder: agent.placeholder.clone(),
        }
    }
}

impl From<AgentInfo> for AgentDefinition {
    fn from(info: AgentInfo) -> Self {
        AgentDefinition {
            id: info.id,
            name: info.name,
            description: info.description,
            prompt: info.prompt,
            placeholder: info.placeholder,
        }
    }
}

/// Immutable, ordered set of agents
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<AgentDefinition>,
}

impl AgentRegistry {
    /// Build a registry from an explicit list
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the list is empty, an id
    /// appears twice, or any field is blank.
    pub fn new(agents: Vec<AgentDefinition>) -> Result<Self> {
        if agents.is_empty() {
            return Err(AppError::Configuration(
                "Agent registry must contain at least one agent".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            agent.validate()?;
            if !seen.insert(agent.id.as_str()) {
                return Err(AppError::Configuration(format!(
                    "Duplicate agent id '{}'",
                    agent.id
                )));
            }
        }

        Ok(Self { agents })
    }

    /// The agents shipped with the server
    pub fn builtin() -> Self {
        Self {
            agents: builtin_agents(),
        }
    }

    /// All agents in their fixed order
    pub fn list(&self) -> &[AgentDefinition] {
        &self.agents
    }

    /// The first agent, selected when a client starts
    pub fn default_agent(&self) -> &AgentDefinition {
        &self.agents[0]
    }

    /// Exact, case-sensitive lookup
    pub fn find_by_id(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Public listing records in registry order
    pub fn infos(&self) -> Vec<AgentInfo> {
        self.agents.iter().map(AgentInfo::from).collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
