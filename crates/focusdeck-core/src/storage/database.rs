//! SQLite-backed record stores.
//!
//! Two collections back the REST API:
//! - `goals`: one row per persisted focus-session goal
//! - `todos`: one row per task
//!
//! Rows carry uuid TEXT primary keys and RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::domain::{Goal, GoalStatus, Todo};
use crate::error::{CoreError, DatabaseError};

use super::data_dir;

/// SQLite database holding the goal and todo collections.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focusdeck/focusdeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focusdeck.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (and migrate) the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS goals (
                    id           TEXT PRIMARY KEY,
                    title        TEXT NOT NULL,
                    duration_min INTEGER NOT NULL,
                    status       TEXT NOT NULL DEFAULT 'active',
                    created_at   TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS todos (
                    id            TEXT PRIMARY KEY,
                    title         TEXT NOT NULL,
                    time_estimate TEXT NOT NULL DEFAULT '',
                    completed     INTEGER NOT NULL DEFAULT 0,
                    created_at    TEXT NOT NULL,
                    owner_tag     TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_goals_created_at ON goals(created_at);
                CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Goals ────────────────────────────────────────────────────────

    /// Insert a new active goal and return the stored record.
    pub fn insert_goal(&self, title: &str, duration_min: u32) -> Result<Goal, DatabaseError> {
        let goal = Goal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            duration: duration_min,
            status: GoalStatus::Active,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO goals (id, title, duration_min, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                goal.id.to_string(),
                goal.title,
                goal.duration,
                goal.status.as_str(),
                goal.created_at.to_rfc3339(),
            ],
        )?;
        Ok(goal)
    }

    /// The most recent goals, newest first.
    pub fn recent_goals(&self, limit: usize) -> Result<Vec<Goal>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, duration_min, status, created_at
             FROM goals ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], goal_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_goal(&self, id: Uuid) -> Result<Option<Goal>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, duration_min, status, created_at FROM goals WHERE id = ?1",
        )?;
        match stmt.query_row(params![id.to_string()], goal_from_row) {
            Ok(goal) => Ok(Some(goal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a goal's status. Returns the updated record, or `None` for an
    /// unknown id. Re-applying the same status is harmless.
    pub fn set_goal_status(
        &self,
        id: Uuid,
        status: GoalStatus,
    ) -> Result<Option<Goal>, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE goals SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_goal(id)
    }

    // ── Todos ────────────────────────────────────────────────────────

    /// Insert a new task and return the stored record.
    pub fn insert_todo(&self, title: &str, time_estimate: &str) -> Result<Todo, DatabaseError> {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            time_estimate: time_estimate.to_string(),
            completed: false,
            created_at: Utc::now(),
            owner_tag: None,
        };
        self.conn.execute(
            "INSERT INTO todos (id, title, time_estimate, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                todo.id.to_string(),
                todo.title,
                todo.time_estimate,
                todo.completed,
                todo.created_at.to_rfc3339(),
            ],
        )?;
        Ok(todo)
    }

    /// All tasks in creation order.
    pub fn list_todos(&self) -> Result<Vec<Todo>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, time_estimate, completed, created_at, owner_tag
             FROM todos ORDER BY created_at ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], todo_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Set a task's completion flag. Returns the updated record, or `None`
    /// for an unknown id.
    pub fn set_todo_completed(
        &self,
        id: Uuid,
        completed: bool,
    ) -> Result<Option<Todo>, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE todos SET completed = ?1 WHERE id = ?2",
            params![completed, id.to_string()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, title, time_estimate, completed, created_at, owner_tag
             FROM todos WHERE id = ?1",
        )?;
        match stmt.query_row(params![id.to_string()], todo_from_row) {
            Ok(todo) => Ok(Some(todo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a task. Returns whether a row was removed.
    pub fn delete_todo(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id.to_string()])?;
        Ok(changed > 0)
    }
}

fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: parse_uuid(row, 0)?,
        title: row.get(1)?,
        duration: row.get(2)?,
        status: match row.get::<_, String>(3)?.as_str() {
            "completed" => GoalStatus::Completed,
            _ => GoalStatus::Active,
        },
        created_at: parse_timestamp(row, 4)?,
    })
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: parse_uuid(row, 0)?,
        title: row.get(1)?,
        time_estimate: row.get(2)?,
        completed: row.get(3)?,
        created_at: parse_timestamp(row, 4)?,
        owner_tag: row.get(5)?,
    })
}

fn parse_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
