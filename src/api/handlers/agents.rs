use crate::{
    AppState,
    types::{AgentsListResponse, CompletionRequest, CompletionResponse, ErrorResponse, Result},
};
use axum::{Json, body::Bytes, extract::State};

/// List the available agents
#[utoipa::path(
    get,
    path = "/api/agents",
    responses(
        (status = 200, description = "Agents in display order", body = AgentsListResponse)
    ),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentsListResponse> {
    Json(AgentsListResponse {
        agents: state.agent_registry.infos(),
    })
}

/// Rewrite text with the selected agent
///
/// The body is parsed by the gateway, so schema violations produce the same
/// `{"error": ...}` payload as every other failure.
#[utoipa::path(
    post,
    path = "/api/agents",
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "Rewritten text", body = CompletionResponse),
        (status = 400, description = "Malformed payload or missing fields", body = ErrorResponse),
        (status = 404, description = "Unknown agent", body = ErrorResponse),
        (status = 500, description = "Provider not configured or unreachable", body = ErrorResponse)
    ),
    tag = "agents"
)]
pub async fn complete(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CompletionResponse>> {
    let response = state.gateway.complete_raw(&body).await?;
    Ok(Json(response))
}
