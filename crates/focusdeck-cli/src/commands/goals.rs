use clap::Subcommand;

use focusdeck_core::{Config, GoalStatus, SyncAdapter};

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Show the most recent goals, newest first
    Recent,
}

pub async fn run(action: GoalsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let sync = SyncAdapter::new(&config.api.base_url);

    match action {
        GoalsAction::Recent => {
            let goals = sync.recent_goals(5).await;
            if goals.is_empty() {
                println!("No goals yet.");
                return Ok(());
            }
            for goal in goals {
                let marker = match goal.status {
                    GoalStatus::Completed => "x",
                    GoalStatus::Active => " ",
                };
                println!(
                    "[{marker}] {}  ({} min)  {}",
                    goal.title,
                    goal.duration,
                    goal.created_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
    }
    Ok(())
}
