// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Interactive workout session driven from stdin
// ABOUTME: Multiplexes typed commands with clock and rest ticks in one select loop

use std::sync::Arc;

use pierre_workout_tracker::config::SessionConfig;
use pierre_workout_tracker::errors::{AppError, AppResult};
use pierre_workout_tracker::session::{ExerciseSets, SessionRuntime, SessionUpdate};
use pierre_workout_tracker::store::WorkoutStore;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{
    display_header, display_ledger, display_report, display_rest_remaining,
};
use crate::helpers::input::{SessionCommand, HELP};

type Runtime = SessionRuntime<dyn WorkoutStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Finished,
    Quit,
}

/// Run a session until it is saved, abandoned, or stdin closes
pub async fn run(
    store: Arc<dyn WorkoutStore>,
    workout_id: Uuid,
    user_id: Uuid,
    config: &SessionConfig,
) -> AppResult<()> {
    let mut runtime: Runtime = SessionRuntime::start(store, workout_id, user_id, config).await?;
    display_ledger(&runtime.snapshot(), runtime.controller().ledger());
    println!("\n{HELP}");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        tokio::select! {
            update = runtime.next_event() => on_update(update),
            line = lines.next_line() => {
                let line = line
                    .map_err(|e| AppError::internal(format!("Failed to read input: {e}")))?;
                let Some(line) = line else {
                    info!("Input closed, abandoning session");
                    runtime.abandon().await;
                    return Ok(());
                };
                let flow = match line.parse::<SessionCommand>() {
                    Ok(command) => handle(&mut runtime, command).await,
                    Err(e) => {
                        eprintln!("{}", e.message);
                        Flow::Continue
                    }
                };
                match flow {
                    Flow::Continue => {}
                    Flow::Finished => return Ok(()),
                    Flow::Quit => {
                        runtime.abandon().await;
                        println!("Workout discarded");
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn on_update(update: SessionUpdate) {
    match update {
        SessionUpdate::RestCounting(remaining) if remaining % 10 == 0 || remaining <= 3 => {
            display_rest_remaining(remaining);
        }
        SessionUpdate::RestFinished => println!("Rest complete, next set!"),
        SessionUpdate::RestCounting(_) | SessionUpdate::Elapsed(_) | SessionUpdate::Ignored => {}
    }
}

async fn handle(runtime: &mut Runtime, command: SessionCommand) -> Flow {
    match command {
        SessionCommand::Edit {
            exercise,
            set,
            field,
            value,
        } => {
            let Some(exercise_id) = exercise_at(runtime, exercise) else {
                eprintln!("No exercise {exercise}");
                return Flow::Continue;
            };
            match runtime.update_entry(exercise_id, set, field, value) {
                Ok(true) => {}
                Ok(false) => eprintln!("Set {set} is already completed"),
                Err(e) => eprintln!("{}", e.message),
            }
            Flow::Continue
        }
        SessionCommand::Done { exercise, set } => {
            let Some(exercise_id) = exercise_at(runtime, exercise) else {
                eprintln!("No exercise {exercise}");
                return Flow::Continue;
            };
            match runtime.complete_set(exercise_id, set) {
                Ok(outcome) if outcome.newly_completed => {
                    display_header(&runtime.snapshot());
                    if let Some(overlay) = runtime.controller().rest_timer().overlay() {
                        println!("Rest {} after {}", overlay.formatted, overlay.exercise_name);
                    }
                }
                Ok(_) => eprintln!("Set {set} is already completed"),
                Err(e) => eprintln!("{}", e.message),
            }
            Flow::Continue
        }
        SessionCommand::SkipRest => {
            if !runtime.skip_rest() {
                eprintln!("No rest is running");
            }
            Flow::Continue
        }
        SessionCommand::Status => {
            display_ledger(&runtime.snapshot(), runtime.controller().ledger());
            Flow::Continue
        }
        SessionCommand::Finish { force } => finish(runtime, force).await,
        SessionCommand::Help => {
            println!("{HELP}");
            Flow::Continue
        }
        SessionCommand::Quit => Flow::Quit,
    }
}

async fn finish(runtime: &mut Runtime, force: bool) -> Flow {
    if !force && !runtime.all_completed() {
        let snapshot = runtime.snapshot();
        println!(
            "{} of {} sets completed. Type 'finish --force' to save anyway.",
            snapshot.completed_sets, snapshot.total_sets
        );
        return Flow::Continue;
    }
    match runtime.finish().await {
        Ok(report) => {
            display_report(&report);
            Flow::Finished
        }
        Err(e) => {
            eprintln!("Could not save workout: {e}");
            eprintln!("The session is still open; type 'finish' to try again.");
            Flow::Continue
        }
    }
}

fn exercise_at(runtime: &Runtime, position: usize) -> Option<Uuid> {
    position
        .checked_sub(1)
        .and_then(|index| runtime.controller().ledger().exercises().get(index))
        .map(ExerciseSets::exercise_id)
}
