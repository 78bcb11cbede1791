pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/match",
            post(handlers::handle_match_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/match/text", post(handlers::handle_match_text))
        .route("/api/v1/quality", post(handlers::handle_quality))
        .route("/api/v1/skills", post(handlers::handle_skill_preview))
        .with_state(state)
}
