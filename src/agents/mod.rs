//! Agent definitions and the read-only registry that holds them.
//!
//! An agent is a persona: a system prompt plus the metadata the client needs
//! to present it (name, description, placeholder). The set is fixed at
//! process start; see [`AgentRegistry::builtin`].

mod builtin;
pub mod registry;

pub use registry::{AgentDefinition, AgentRegistry};
