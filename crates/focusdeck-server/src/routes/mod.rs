//! Router assembly.

pub mod goals;
pub mod todos;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    // The browser client is served from another port during development,
    // so CORS stays permissive.
    Router::new()
        .route("/", get(health))
        .route("/api/goals", post(goals::create).get(goals::recent))
        .route("/api/goals/{id}", patch(goals::update_status))
        .route("/api/todos", get(todos::list).post(todos::create))
        .route("/api/todos/{id}", patch(todos::update).delete(todos::remove))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "Focusdeck API is running"
}
