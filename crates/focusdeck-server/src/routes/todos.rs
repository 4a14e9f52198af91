//! Todo collection handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{bad_request, internal, not_found, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    time_estimate: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    completed: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    deleted: bool,
}

/// GET /api/todos -- every task, creation order.
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let db = state.db.lock().await;
    let todos = db.list_todos().map_err(internal)?;
    Ok(Json(todos))
}

/// POST /api/todos.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(bad_request("'title' must not be empty"));
    }

    let db = state.db.lock().await;
    let todo = db
        .insert_todo(title, body.time_estimate.trim())
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PATCH /api/todos/:id -- completion flag only.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.db.lock().await;
    let todo = db
        .set_todo_completed(id, body.completed)
        .map_err(internal)?
        .ok_or_else(|| not_found(format!("no todo with id {id}")))?;
    Ok(Json(todo))
}

/// DELETE /api/todos/:id.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let db = state.db.lock().await;
    let deleted = db.delete_todo(id).map_err(internal)?;
    if !deleted {
        return Err(not_found(format!("no todo with id {id}")));
    }
    Ok(Json(DeleteResponse { deleted }))
}
