//! # Focusdeck Core Library
//!
//! Core business logic for Focusdeck, a personal productivity app combining
//! a Pomodoro-style focus timer, a to-do list, and a habit tracker. The CLI
//! binary is a thin presentation layer over this library; the server binary
//! exposes the record stores over REST.
//!
//! ## Architecture
//!
//! - **Session Engine**: a tick-driven state machine for the focus/break
//!   cycle -- the caller invokes `tick()` once per elapsed second
//! - **Storage**: SQLite-based goal/todo stores and TOML-based configuration
//! - **Api / Sync**: typed REST client plus a best-effort sync adapter that
//!   never blocks the timer on a network failure
//! - **Todos**: client-side list manager with local-only ordering
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: the focus/break state machine
//! - [`Database`]: goal and todo persistence
//! - [`SyncAdapter`]: fire-and-forget goal persistence bridge
//! - [`TodoManager`]: to-do CRUD with a local cache

pub mod api;
pub mod domain;
pub mod error;
pub mod events;
pub mod habits;
pub mod session;
pub mod storage;
pub mod sync;
pub mod todos;

pub use api::ApiClient;
pub use domain::{Goal, GoalStatus, Todo};
pub use error::{ApiError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use habits::Habit;
pub use session::{Phase, ScheduleConfig, SessionEngine, SessionState};
pub use storage::{Config, Database};
pub use sync::SyncAdapter;
pub use todos::TodoManager;
