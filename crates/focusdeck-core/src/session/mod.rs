mod engine;

pub use engine::{Phase, ScheduleConfig, SessionEngine, SessionState};
