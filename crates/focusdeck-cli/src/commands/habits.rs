use focusdeck_core::habits::{overall_streak, sample_habits, WEEKDAY_LABELS};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let habits = sample_habits();
    println!("Habit Tracker -- {} day streak", overall_streak(&habits));

    for habit in habits {
        println!();
        println!("{}  ({} day streak)", habit.name, habit.streak);
        for label in WEEKDAY_LABELS {
            print!(" {label}");
        }
        println!();
        for done in habit.history {
            print!(" {}", if done { "x" } else { "." });
        }
        println!();
    }
    Ok(())
}
