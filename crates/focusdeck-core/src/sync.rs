//! Best-effort bridge between the session engine and the goal store.
//!
//! Every method degrades to a log line on failure. The timer keeps running
//! locally when the backend is down; nothing here ever reaches the user as
//! a blocking error.

use tracing::warn;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::domain::{Goal, GoalStatus};

#[derive(Debug, Clone)]
pub struct SyncAdapter {
    api: ApiClient,
}

impl SyncAdapter {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Persist a goal for a starting focus session.
    ///
    /// Returns the new goal id, or `None` when the backend is unreachable
    /// or rejects the request -- the session then runs unlinked.
    pub async fn create_goal(&self, title: &str, duration_min: u32) -> Option<Uuid> {
        match self.api.create_goal(title, duration_min).await {
            Ok(goal) => Some(goal.id),
            Err(err) => {
                warn!(%err, "goal create failed, session continues unlinked");
                None
            }
        }
    }

    /// Mark a goal completed. Fire-and-forget: failures are logged only.
    /// Re-completing an already-completed goal is harmless.
    pub async fn complete_goal(&self, id: Uuid) {
        if let Err(err) = self.api.set_goal_status(id, GoalStatus::Completed).await {
            warn!(goal_id = %id, %err, "goal completion patch failed");
        }
    }

    /// Most recent goals, newest first; empty on failure.
    pub async fn recent_goals(&self, limit: usize) -> Vec<Goal> {
        match self.api.recent_goals().await {
            Ok(mut goals) => {
                goals.truncate(limit);
                goals
            }
            Err(err) => {
                warn!(%err, "goal history fetch failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on this port; connects fail immediately.
    const DEAD_BACKEND: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn create_against_dead_backend_yields_no_id() {
        let sync = SyncAdapter::new(DEAD_BACKEND);
        assert!(sync.create_goal("Write report", 25).await.is_none());
    }

    #[tokio::test]
    async fn complete_against_dead_backend_is_silent() {
        let sync = SyncAdapter::new(DEAD_BACKEND);
        sync.complete_goal(Uuid::new_v4()).await;
    }

    #[tokio::test]
    async fn history_against_dead_backend_is_empty() {
        let sync = SyncAdapter::new(DEAD_BACKEND);
        assert!(sync.recent_goals(5).await.is_empty());
    }

    #[tokio::test]
    async fn rejected_create_yields_no_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/goals")
            .with_status(400)
            .with_body(r#"{"message":"'title' must not be empty"}"#)
            .create_async()
            .await;

        let sync = SyncAdapter::new(&server.url());
        assert!(sync.create_goal("", 25).await.is_none());
    }

    #[tokio::test]
    async fn history_respects_limit() {
        let mut server = mockito::Server::new_async().await;
        let goals: Vec<String> = (0..7)
            .map(|i| {
                serde_json::json!({
                    "id": Uuid::new_v4(),
                    "title": format!("goal {i}"),
                    "duration": 25,
                    "status": "active",
                    "createdAt": chrono::Utc::now(),
                })
                .to_string()
            })
            .collect();
        server
            .mock("GET", "/api/goals")
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", goals.join(",")))
            .create_async()
            .await;

        let sync = SyncAdapter::new(&server.url());
        assert_eq!(sync.recent_goals(5).await.len(), 5);
    }
}
