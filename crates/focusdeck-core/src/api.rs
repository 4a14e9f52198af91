//! Typed REST client for the Focusdeck backend.
//!
//! Thin wrapper over reqwest; every method maps to one endpoint and
//! propagates failures as [`ApiError`]. Best-effort semantics live one
//! layer up in [`crate::sync::SyncAdapter`] -- this client never swallows
//! an error.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Goal, GoalStatus, Todo};
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ok(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    // ── Goals ────────────────────────────────────────────────────────

    /// POST /api/goals -- persist a new active goal.
    pub async fn create_goal(&self, title: &str, duration_min: u32) -> Result<Goal, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/goals"))
            .json(&json!({ "title": title, "duration": duration_min }))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    /// GET /api/goals -- most recent goals, newest first.
    pub async fn recent_goals(&self) -> Result<Vec<Goal>, ApiError> {
        let resp = self.http.get(self.url("/api/goals")).send().await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    /// PATCH /api/goals/:id -- update the status field.
    pub async fn set_goal_status(&self, id: Uuid, status: GoalStatus) -> Result<Goal, ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/api/goals/{id}")))
            .json(&json!({ "status": status.as_str() }))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    // ── Todos ────────────────────────────────────────────────────────

    /// GET /api/todos -- the full task list.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let resp = self.http.get(self.url("/api/todos")).send().await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    /// POST /api/todos -- persist a new task.
    pub async fn create_todo(&self, title: &str, time_estimate: &str) -> Result<Todo, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/todos"))
            .json(&json!({ "title": title, "timeEstimate": time_estimate }))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    /// PATCH /api/todos/:id -- set the completion flag.
    pub async fn set_todo_completed(&self, id: Uuid, completed: bool) -> Result<Todo, ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/api/todos/{id}")))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    /// DELETE /api/todos/:id.
    pub async fn delete_todo(&self, id: Uuid) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/todos/{id}")))
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }
}
