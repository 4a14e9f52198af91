use clap::Subcommand;
use uuid::Uuid;

use focusdeck_core::{ApiClient, Config, Todo, TodoManager};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Show the task list
    List,
    /// Add a task
    Add {
        title: String,
        /// Free-form estimate, e.g. "30m" or "1h"
        #[arg(long)]
        estimate: Option<String>,
    },
    /// Flip a task's completion flag
    Toggle { id: Uuid },
    /// Delete a task
    Rm { id: Uuid },
    /// Move a task in the local view (ordering is not persisted)
    Reorder { from: usize, to: usize },
}

pub async fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut todos = TodoManager::new(ApiClient::new(&config.api.base_url));
    todos.refresh().await?;

    match action {
        TodoAction::List => print_list(todos.items()),
        TodoAction::Add { title, estimate } => {
            let todo = todos.create(&title, estimate.as_deref()).await?;
            println!("Added '{}' ({})", todo.title, todo.id);
        }
        TodoAction::Toggle { id } => {
            let todo = todos.toggle_completed(id).await?;
            let state = if todo.completed { "done" } else { "open" };
            println!("'{}' is now {state}", todo.title);
        }
        TodoAction::Rm { id } => {
            todos.delete(id).await?;
            println!("Deleted {id}");
        }
        TodoAction::Reorder { from, to } => {
            if !todos.reorder(from, to) {
                return Err("position out of range".into());
            }
            print_list(todos.items());
            println!("(ordering is view-local and resets on the next list)");
        }
    }
    Ok(())
}

fn print_list(items: &[Todo]) {
    if items.is_empty() {
        println!("No tasks.");
        return;
    }
    for (i, todo) in items.iter().enumerate() {
        let marker = if todo.completed { "x" } else { " " };
        let estimate = if todo.time_estimate.is_empty() {
            String::new()
        } else {
            format!("  ~{}", todo.time_estimate)
        };
        println!("{i:>2} [{marker}] {}{estimate}  ({})", todo.title, todo.id);
    }
}
