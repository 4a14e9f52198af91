//! Shared application state.

use focusdeck_core::Database;
use tokio::sync::Mutex;

/// Created once at startup and shared by every handler.
///
/// SQLite access is serialized behind one mutex; a single-user app never
/// sees enough concurrency for that to matter.
pub struct AppState {
    pub db: Mutex<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }
}
