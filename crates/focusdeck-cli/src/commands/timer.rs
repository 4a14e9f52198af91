//! Interactive focus session.
//!
//! The 1 Hz loop below is the only mutator of the session engine. Goal
//! persistence runs in spawned tasks that report back over a channel, so a
//! slow or dead backend never stalls a tick.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use uuid::Uuid;

use focusdeck_core::{Config, Event, SessionEngine, SessionState, SyncAdapter};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus session followed by its break
    Run {
        /// Focus length in minutes (values below 1 are clamped up)
        #[arg(long, default_value_t = 25)]
        minutes: u32,
        /// What this session is for; persisted as a goal when set
        #[arg(long)]
        goal: Option<String>,
    },
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { minutes, goal } => run_session(minutes, goal).await,
    }
}

async fn run_session(minutes: u32, goal: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let cycles = config.schedule.cycles_before_long_break;
    let sync = SyncAdapter::new(&config.api.base_url);
    let mut engine = SessionEngine::new(config.schedule);

    let minutes = minutes.max(1);

    // Goal-create responses come back through this channel tagged with the
    // generation they belong to; the engine drops stale ones.
    let (tx, mut rx) = mpsc::channel::<(u64, Option<Uuid>)>(4);

    if let Some(Event::FocusStarted {
        generation,
        goal: Some(title),
        ..
    }) = engine.start_focus(goal, minutes)
    {
        let sync = sync.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let id = sync.create_goal(&title, minutes).await;
            let _ = tx.send((generation, id)).await;
        });
    }

    println!("Focus started ({minutes} min). Commands: p pause/resume, s skip break, r restart, q quit.");

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await; // the first tick fires immediately
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    render(&engine, cycles);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match engine.tick() {
                    Some(Event::FocusCompleted { goal_id, break_phase, break_secs, .. }) => {
                        chime();
                        if let Some(id) = goal_id {
                            let sync = sync.clone();
                            tokio::spawn(async move { sync.complete_goal(id).await });
                        }
                        println!();
                        println!(
                            "Focus complete. {} starts now ({} min).",
                            break_phase.label(),
                            break_secs / 60
                        );
                    }
                    Some(Event::BreakCompleted { .. }) => {
                        chime();
                        println!();
                        println!("Break over. Back to setup.");
                        break;
                    }
                    _ => {}
                }
                render(&engine, cycles);
            }
            line = input.next_line() => {
                let Ok(Some(line)) = line else { break };
                match line.trim() {
                    "p" => match engine.toggle_pause() {
                        Some(Event::Paused { .. }) => println!("\nPaused."),
                        Some(Event::Resumed { .. }) => println!("\nResumed."),
                        _ => {}
                    },
                    "s" => {
                        if engine.skip_break().is_some() {
                            println!("\nBreak skipped. Back to setup.");
                            break;
                        }
                        println!("\nNothing to skip: not on a break.");
                    }
                    "r" => {
                        engine.restart();
                        println!("\nSession restarted. Back to setup.");
                        break;
                    }
                    "q" => {
                        println!();
                        break;
                    }
                    "" => {}
                    other => println!("\nUnknown command '{other}' (p/s/r/q)."),
                }
                render(&engine, cycles);
            }
            Some((generation, goal_id)) = rx.recv() => {
                if let Some(id) = goal_id {
                    engine.link_goal(generation, id);
                }
            }
        }
    }

    Ok(())
}

fn render(engine: &SessionEngine, cycles: u32) {
    let secs = engine.remaining_secs();
    let tag = match engine.state() {
        SessionState::Paused => " [paused]",
        _ => "",
    };
    print!(
        "\r{:<12} {:02}:{:02}  cycle {}/{}  sessions {}{}   ",
        engine.phase().label(),
        secs / 60,
        secs % 60,
        engine.cycle(),
        cycles,
        engine.completed_sessions(),
        tag,
    );
    let _ = std::io::stdout().flush();
}

/// Terminal bell; platforms that mute it just stay quiet.
fn chime() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}
