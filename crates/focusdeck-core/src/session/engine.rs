//! Session engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no clock and spawns no
//! threads -- the caller invokes `tick()` once per elapsed second while the
//! session is running, which makes the cycle logic deterministic under test.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(Focus) -> Running(Break) -> Idle
//!              ^   v
//!             Paused
//! ```
//!
//! `Idle` is the focus setup screen. Breaks auto-start when a focus
//! countdown reaches zero, so `Idle` only ever pairs with `Phase::Focus`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(ScheduleConfig::default());
//! engine.start_focus(Some("Write report".into()), 25);
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when a phase completes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::Event;

/// Focus/break schedule knobs, the `[schedule]` section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_cycles_before_long_break")]
    pub cycles_before_long_break: u32,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_cycles_before_long_break() -> u32 {
    4
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_before_long_break: default_cycles_before_long_break(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Focus setup: nothing counting down.
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Focus)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// The focus/break state machine.
///
/// Ephemeral by design: created at startup, mutated only through the
/// commands below, and gone with the process. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    schedule: ScheduleConfig,
    state: SessionState,
    phase: Phase,
    remaining_secs: u32,
    total_secs: u32,
    /// Position within the rotation, 1..=cycles_before_long_break.
    cycle: u32,
    completed_sessions: u32,
    goal_text: Option<String>,
    linked_goal: Option<Uuid>,
    /// Bumped on every focus start and restart. Create-goal responses
    /// carrying an older generation are dropped instead of linked.
    generation: u64,
}

impl SessionEngine {
    /// Create a new engine in the setup state with the default focus clock.
    pub fn new(schedule: ScheduleConfig) -> Self {
        let remaining = schedule.focus_minutes.saturating_mul(60);
        Self {
            schedule,
            state: SessionState::Idle,
            phase: Phase::Focus,
            remaining_secs: remaining,
            total_secs: remaining,
            cycle: 1,
            completed_sessions: 0,
            goal_text: None,
            linked_goal: None,
            generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn goal_text(&self) -> Option<&str> {
        self.goal_text.as_deref()
    }

    pub fn linked_goal(&self) -> Option<Uuid> {
        self.linked_goal
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            cycle: self.cycle,
            completed_sessions: self.completed_sessions,
            goal: self.goal_text.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a focus countdown from the setup state.
    ///
    /// `minutes` must already be clamped to `>= 1` by the presentation
    /// layer. Returns `None` when a session is already underway.
    pub fn start_focus(&mut self, goal: Option<String>, minutes: u32) -> Option<Event> {
        if self.state != SessionState::Idle {
            return None;
        }
        let secs = minutes.saturating_mul(60);
        self.generation += 1;
        self.state = SessionState::Running;
        self.phase = Phase::Focus;
        self.remaining_secs = secs;
        self.total_secs = secs;
        self.goal_text = goal.map(|g| g.trim().to_string()).filter(|g| !g.is_empty());
        self.linked_goal = None;
        Some(Event::FocusStarted {
            goal: self.goal_text.clone(),
            duration_secs: secs,
            cycle: self.cycle,
            generation: self.generation,
            at: Utc::now(),
        })
    }

    /// Attach the persisted goal id for `generation` to the live session.
    ///
    /// Returns `false` (and drops the id) when the session was restarted
    /// since the create request went out, or the focus phase already ended.
    pub fn link_goal(&mut self, generation: u64, goal_id: Uuid) -> bool {
        if generation != self.generation
            || self.phase != Phase::Focus
            || self.state == SessionState::Idle
        {
            return false;
        }
        self.linked_goal = Some(goal_id);
        true
    }

    /// Advance the countdown by one elapsed second.
    ///
    /// Returns `Some(Event)` exactly once per phase, on the tick that
    /// reaches zero. No-op unless running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.reach_zero())
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Paused;
        Some(Event::Paused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Running;
        Some(Event::Resumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// The single pause/resume intent exposed by the presentation layer.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Idle => None,
        }
    }

    /// Force everything back to the initial setup state. Idempotent.
    pub fn restart(&mut self) -> Event {
        self.generation += 1;
        self.cycle = 1;
        self.completed_sessions = 0;
        self.reset_to_setup();
        Event::Restarted { at: Utc::now() }
    }

    /// End the current break immediately, exactly as if it had elapsed.
    /// Valid only during a break; the session counter is untouched.
    pub fn skip_break(&mut self) -> Option<Event> {
        if !self.phase.is_break() {
            return None;
        }
        self.reset_to_setup();
        Some(Event::BreakSkipped { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reach_zero(&mut self) -> Event {
        match self.phase {
            Phase::Focus => {
                let goal_id = self.linked_goal.take();
                self.goal_text = None;
                self.completed_sessions += 1;
                let cycles = self.schedule.cycles_before_long_break.max(1);
                // Post-increment wrap-around: the long break fires exactly
                // when the counter wraps back to 1.
                let next = self.cycle % cycles + 1;
                self.cycle = next;
                let (phase, minutes) = if next == 1 {
                    (Phase::LongBreak, self.schedule.long_break_minutes)
                } else {
                    (Phase::ShortBreak, self.schedule.short_break_minutes)
                };
                let secs = minutes.saturating_mul(60);
                self.phase = phase;
                self.remaining_secs = secs;
                self.total_secs = secs;
                // state stays Running: the break auto-starts.
                Event::FocusCompleted {
                    goal_id,
                    completed_sessions: self.completed_sessions,
                    break_phase: phase,
                    break_secs: secs,
                    cycle: next,
                    at: Utc::now(),
                }
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.reset_to_setup();
                Event::BreakCompleted { at: Utc::now() }
            }
        }
    }

    fn reset_to_setup(&mut self) {
        let secs = self.schedule.focus_minutes.saturating_mul(60);
        self.state = SessionState::Idle;
        self.phase = Phase::Focus;
        self.remaining_secs = secs;
        self.total_secs = secs;
        self.goal_text = None;
        self.linked_goal = None;
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fields(engine: &SessionEngine) -> (SessionState, Phase, u32, u32, u32) {
        (
            engine.state(),
            engine.phase(),
            engine.remaining_secs(),
            engine.cycle(),
            engine.completed_sessions(),
        )
    }

    /// Tick a running engine until a phase-completion event fires.
    fn run_out(engine: &mut SessionEngine) -> Event {
        loop {
            if let Some(event) = engine.tick() {
                return event;
            }
        }
    }

    #[test]
    fn starts_in_setup_with_default_clock() {
        let engine = SessionEngine::default();
        assert_eq!(engine.state(), SessionState::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert_eq!(engine.cycle(), 1);
    }

    #[test]
    fn start_focus_sets_clock_and_runs() {
        let mut engine = SessionEngine::default();
        let event = engine.start_focus(Some("Write report".into()), 40).unwrap();
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.remaining_secs(), 40 * 60);
        assert_eq!(engine.goal_text(), Some("Write report"));
        match event {
            Event::FocusStarted { duration_secs, .. } => assert_eq!(duration_secs, 40 * 60),
            other => panic!("expected FocusStarted, got {other:?}"),
        }
    }

    #[test]
    fn start_focus_rejected_while_running() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 25).unwrap();
        assert!(engine.start_focus(None, 10).is_none());
        assert_eq!(engine.remaining_secs(), 25 * 60);
    }

    #[test]
    fn tick_is_noop_when_not_running() {
        let mut engine = SessionEngine::default();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 25 * 60);

        engine.start_focus(None, 25).unwrap();
        engine.pause();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 25 * 60);
    }

    #[test]
    fn focus_reaches_zero_exactly_once() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 1).unwrap();
        for _ in 0..59 {
            assert!(engine.tick().is_none());
        }
        let event = engine.tick().unwrap();
        assert!(matches!(event, Event::FocusCompleted { .. }));
        // The break clock is already full; the next tick completes nothing.
        assert!(engine.tick().is_none());
    }

    #[test]
    fn break_follows_focus_automatically() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 1).unwrap();
        let event = run_out(&mut engine);
        match event {
            Event::FocusCompleted {
                break_phase,
                break_secs,
                cycle,
                completed_sessions,
                ..
            } => {
                assert_eq!(break_phase, Phase::ShortBreak);
                assert_eq!(break_secs, 5 * 60);
                assert_eq!(cycle, 2);
                assert_eq!(completed_sessions, 1);
            }
            other => panic!("expected FocusCompleted, got {other:?}"),
        }
        // Break auto-started: still running, no goal text carried over.
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert!(engine.goal_text().is_none());
    }

    #[test]
    fn long_break_after_fourth_cycle() {
        let mut engine = SessionEngine::default();
        let mut break_lengths = Vec::new();
        for _ in 0..4 {
            engine.start_focus(None, 1).unwrap();
            match run_out(&mut engine) {
                Event::FocusCompleted { break_secs, .. } => break_lengths.push(break_secs),
                other => panic!("expected FocusCompleted, got {other:?}"),
            }
            // Ride out the break back to setup.
            assert!(matches!(run_out(&mut engine), Event::BreakCompleted { .. }));
        }
        assert_eq!(break_lengths, vec![300, 300, 300, 900]);
        // Wrapped around: the rotation starts over.
        assert_eq!(engine.cycle(), 1);
        assert_eq!(engine.completed_sessions(), 4);
    }

    #[test]
    fn break_completion_returns_to_setup() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 1).unwrap();
        run_out(&mut engine);
        let event = run_out(&mut engine);
        assert!(matches!(event, Event::BreakCompleted { .. }));
        assert_eq!(engine.state(), SessionState::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert!(engine.linked_goal().is_none());
    }

    #[test]
    fn skip_break_matches_waiting_out_the_break() {
        let mut waited = SessionEngine::default();
        let mut skipped = SessionEngine::default();
        for engine in [&mut waited, &mut skipped] {
            engine.start_focus(None, 1).unwrap();
            run_out(engine);
            assert!(engine.phase().is_break());
        }

        run_out(&mut waited);
        skipped.skip_break().unwrap();

        assert_eq!(fields(&waited), fields(&skipped));
        assert_eq!(waited.completed_sessions(), skipped.completed_sessions());
    }

    #[test]
    fn skip_break_rejected_during_focus() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 25).unwrap();
        assert!(engine.skip_break().is_none());
        assert_eq!(engine.phase(), Phase::Focus);
    }

    #[test]
    fn restart_is_idempotent() {
        let mut engine = SessionEngine::default();
        engine.start_focus(Some("deep work".into()), 50).unwrap();
        for _ in 0..100 {
            engine.tick();
        }

        engine.restart();
        let once = fields(&engine);
        engine.restart();
        assert_eq!(fields(&engine), once);
        assert_eq!(
            once,
            (SessionState::Idle, Phase::Focus, 25 * 60, 1, 0)
        );
    }

    #[test]
    fn pause_preserves_clock_and_phase() {
        let mut engine = SessionEngine::default();
        engine.start_focus(None, 25).unwrap();
        for _ in 0..10 {
            engine.tick();
        }
        let before = engine.remaining_secs();

        assert!(matches!(engine.toggle_pause(), Some(Event::Paused { .. })));
        assert_eq!(engine.remaining_secs(), before);
        assert!(matches!(engine.toggle_pause(), Some(Event::Resumed { .. })));
        assert_eq!(engine.remaining_secs(), before);
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn toggle_pause_in_setup_is_noop() {
        let mut engine = SessionEngine::default();
        assert!(engine.toggle_pause().is_none());
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn completion_reports_linked_goal_exactly_once() {
        // The §8 scenario: 25-minute "Write report" session.
        let mut engine = SessionEngine::default();
        let event = engine.start_focus(Some("Write report".into()), 25).unwrap();
        let generation = match event {
            Event::FocusStarted { generation, .. } => generation,
            other => panic!("expected FocusStarted, got {other:?}"),
        };
        let goal_id = Uuid::new_v4();
        assert!(engine.link_goal(generation, goal_id));

        let mut completions = Vec::new();
        for _ in 0..1500 {
            if let Some(Event::FocusCompleted { goal_id, .. }) = engine.tick() {
                completions.push(goal_id);
            }
        }
        assert_eq!(completions, vec![Some(goal_id)]);
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.remaining_secs(), 300);
        assert_eq!(engine.cycle(), 2);
        assert!(engine.linked_goal().is_none());
    }

    #[test]
    fn unlinked_session_completes_without_goal() {
        // Backend unreachable: no id ever arrives, countdown unaffected.
        let mut engine = SessionEngine::default();
        engine.start_focus(Some("offline work".into()), 1).unwrap();
        match run_out(&mut engine) {
            Event::FocusCompleted { goal_id, .. } => assert!(goal_id.is_none()),
            other => panic!("expected FocusCompleted, got {other:?}"),
        }
    }

    #[test]
    fn stale_link_after_restart_is_dropped() {
        let mut engine = SessionEngine::default();
        let event = engine.start_focus(Some("Write report".into()), 25).unwrap();
        let generation = match event {
            Event::FocusStarted { generation, .. } => generation,
            other => panic!("expected FocusStarted, got {other:?}"),
        };
        engine.restart();
        assert!(!engine.link_goal(generation, Uuid::new_v4()));
        assert!(engine.linked_goal().is_none());
    }

    #[test]
    fn link_during_break_is_dropped() {
        let mut engine = SessionEngine::default();
        let event = engine.start_focus(Some("slow backend".into()), 1).unwrap();
        let generation = match event {
            Event::FocusStarted { generation, .. } => generation,
            other => panic!("expected FocusStarted, got {other:?}"),
        };
        run_out(&mut engine);
        assert!(engine.phase().is_break());
        assert!(!engine.link_goal(generation, Uuid::new_v4()));
    }

    proptest! {
        #[test]
        fn tick_count_matches_duration(minutes in 1u32..=60) {
            let mut engine = SessionEngine::default();
            engine.start_focus(None, minutes).unwrap();
            let mut completions = 0;
            for _ in 0..minutes * 60 {
                if let Some(Event::FocusCompleted { .. }) = engine.tick() {
                    completions += 1;
                }
            }
            prop_assert_eq!(completions, 1);
            prop_assert!(engine.phase().is_break());
        }
    }
}
