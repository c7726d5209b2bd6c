//! API request handlers.

/// Agent listing and completion handlers.
pub mod agents;
/// Liveness handler.
pub mod health;
