use crate::AppState;
use crate::api::ApiDoc;
use axum::{Json, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Routes mounted under `/api`
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/agents",
            get(crate::api::handlers::agents::list_agents)
                .post(crate::api::handlers::agents::complete),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

/// The complete application: health probe, API routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(crate::api::handlers::health::health))
        .nest("/api", create_router())
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
