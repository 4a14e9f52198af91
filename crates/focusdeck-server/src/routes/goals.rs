//! Goal collection handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use focusdeck_core::GoalStatus;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{bad_request, internal, not_found, ApiResult};
use crate::state::AppState;

/// The setup screen shows the last few goals only.
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    title: String,
    /// Planned duration in minutes.
    duration: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    status: String,
}

/// POST /api/goals -- persist the goal captured when focus starts.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGoalRequest>,
) -> ApiResult<impl IntoResponse> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(bad_request("'title' must not be empty"));
    }
    if body.duration == 0 {
        return Err(bad_request("'duration' must be at least 1 minute"));
    }

    let db = state.db.lock().await;
    let goal = db.insert_goal(title, body.duration).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/goals -- the most recent goals, newest first.
pub async fn recent(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let db = state.db.lock().await;
    let goals = db.recent_goals(RECENT_LIMIT).map_err(internal)?;
    Ok(Json(goals))
}

/// PATCH /api/goals/:id -- status updates only.
///
/// A goal only ever moves `active -> completed`; re-completing is accepted
/// (the patch is idempotent), demoting is not.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> ApiResult<impl IntoResponse> {
    let status: GoalStatus = body
        .status
        .parse()
        .map_err(|e: focusdeck_core::ValidationError| bad_request(e.to_string()))?;

    let db = state.db.lock().await;
    let existing = db
        .get_goal(id)
        .map_err(internal)?
        .ok_or_else(|| not_found(format!("no goal with id {id}")))?;
    if existing.status == GoalStatus::Completed && status == GoalStatus::Active {
        return Err(bad_request("a completed goal cannot return to active"));
    }

    let updated = db
        .set_goal_status(id, status)
        .map_err(internal)?
        .ok_or_else(|| not_found(format!("no goal with id {id}")))?;
    Ok(Json(updated))
}
