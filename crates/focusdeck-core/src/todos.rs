//! Client-side to-do list manager.
//!
//! Wraps the REST client with a local cache of the list. Each mutation
//! re-synchronizes only the affected record: the server's returned record
//! replaces its slot, so no list-wide refetch follows a single mutation.
//! Ordering is view-local and lost on reload.

use uuid::Uuid;

use crate::api::ApiClient;
use crate::domain::Todo;
use crate::error::{CoreError, ValidationError};

pub struct TodoManager {
    api: ApiClient,
    items: Vec<Todo>,
}

impl TodoManager {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Replace the cache with the server's list.
    pub async fn refresh(&mut self) -> Result<&[Todo], CoreError> {
        self.items = self.api.list_todos().await?;
        Ok(&self.items)
    }

    /// Create a task. Empty titles are rejected before any request is sent.
    pub async fn create(
        &mut self,
        title: &str,
        time_estimate: Option<&str>,
    ) -> Result<Todo, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        let todo = self
            .api
            .create_todo(title, time_estimate.unwrap_or(""))
            .await?;
        self.items.push(todo.clone());
        Ok(todo)
    }

    /// Flip a task's completion flag.
    pub async fn toggle_completed(&mut self, id: Uuid) -> Result<Todo, CoreError> {
        let idx = self.position(id)?;
        let updated = self
            .api
            .set_todo_completed(id, !self.items[idx].completed)
            .await?;
        self.items[idx] = updated.clone();
        Ok(updated)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), CoreError> {
        let idx = self.position(id)?;
        self.api.delete_todo(id).await?;
        self.items.remove(idx);
        Ok(())
    }

    /// Move the item at `from` to position `to` in the local view.
    /// Never persisted; the server keeps creation order.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    fn position(&self, id: Uuid) -> Result<usize, ValidationError> {
        self.items
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "id".into(),
                message: format!("no todo with id {id}"),
            })
    }
}
