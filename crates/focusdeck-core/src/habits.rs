//! Habit tracker display data.
//!
//! Read-only in the current scope: the grid renders fixed sample records
//! and there is no write path or persistence behind it.

use serde::{Deserialize, Serialize};

pub const WEEKDAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    /// Running streak in days.
    pub streak: u32,
    /// One slot per weekday, Monday first.
    pub history: [bool; 7],
}

/// The fixed sample records shown in the habit grid.
pub fn sample_habits() -> Vec<Habit> {
    vec![
        Habit {
            name: "Weight Lifting".into(),
            streak: 5,
            history: [true, true, true, false, true, false, false],
        },
        Habit {
            name: "Post IG Reel".into(),
            streak: 12,
            history: [true; 7],
        },
    ]
}

/// Aggregate streak shown in the header badge.
pub fn overall_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.streak).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_grid_shape() {
        let habits = sample_habits();
        assert_eq!(habits.len(), 2);
        assert!(habits.iter().all(|h| h.history.len() == WEEKDAY_LABELS.len()));
    }

    #[test]
    fn header_badge_totals_streaks() {
        assert_eq!(overall_streak(&sample_habits()), 17);
    }
}
