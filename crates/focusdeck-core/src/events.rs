use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{Phase, SessionState};

/// Every state change in the session engine produces an Event.
/// The presentation layer renders them; the sync adapter is driven by them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FocusStarted {
        goal: Option<String>,
        duration_secs: u32,
        cycle: u32,
        /// Matches in-flight goal-create responses back to this session.
        generation: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A focus countdown reached zero; the break auto-starts.
    FocusCompleted {
        /// Goal to patch `completed`, when one was linked in time.
        goal_id: Option<Uuid>,
        completed_sessions: u32,
        break_phase: Phase,
        break_secs: u32,
        cycle: u32,
        at: DateTime<Utc>,
    },
    /// A break countdown reached zero; back to setup.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    BreakSkipped {
        at: DateTime<Utc>,
    },
    Restarted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        phase: Phase,
        remaining_secs: u32,
        total_secs: u32,
        cycle: u32,
        completed_sessions: u32,
        goal: Option<String>,
        at: DateTime<Utc>,
    },
}
