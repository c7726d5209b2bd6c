//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Polish, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `GET /health` - Liveness probe, returns `OK`
//! - `GET /api/agents` - List agents as `{"agents": [...]}`
//! - `POST /api/agents` - Rewrite `{"agentId", "input"}` into `{"result"}`
//! - `GET /api/openapi.json` - OpenAPI document
//!
//! Failures return `{"error": "<message>"}` with a 400, 404 or 500 status.

use crate::types::{
    AgentInfo, AgentsListResponse, CompletionRequest, CompletionResponse, ErrorResponse,
};
use utoipa::OpenApi;

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI description of the HTTP API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::agents::list_agents, handlers::agents::complete),
    components(schemas(
        AgentInfo,
        AgentsListResponse,
        CompletionRequest,
        CompletionResponse,
        ErrorResponse
    )),
    tags((name = "agents", description = "Agent listing and text rewriting"))
)]
pub struct ApiDoc;
