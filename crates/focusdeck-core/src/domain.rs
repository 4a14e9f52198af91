//! Durable record types shared by the stores, the REST client, and the
//! server. Wire field names are camelCase to match the original backend
//! payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Lifecycle of a persisted focus goal.
///
/// Transitions only `active -> completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A durable record of one focus session's intent and outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    /// Planned duration in minutes.
    pub duration: u32,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

/// A durable task record, independent of the timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    /// Free-form estimate, e.g. "30m", "1h", "2h30m".
    #[serde(default)]
    pub time_estimate: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Reserved for a future multi-user split; always absent today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_status_round_trips_through_str() {
        assert_eq!("active".parse::<GoalStatus>().unwrap(), GoalStatus::Active);
        assert_eq!(
            "completed".parse::<GoalStatus>().unwrap(),
            GoalStatus::Completed
        );
        assert!("archived".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn goal_wire_format_is_camel_case() {
        let goal = Goal {
            id: Uuid::new_v4(),
            title: "Write report".into(),
            duration: 25,
            status: GoalStatus::Active,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&goal).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn todo_estimate_defaults_to_empty() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "Fix navigation bug",
            "completed": false,
            "createdAt": Utc::now(),
        });
        let todo: Todo = serde_json::from_value(json).unwrap();
        assert_eq!(todo.time_estimate, "");
        assert!(todo.owner_tag.is_none());
    }
}
