// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for pierre-workout
// ABOUTME: Renders the live session, completion reports, and progress views

use pierre_workout_tracker::models::CompletionReport;
use pierre_workout_tracker::progress::{HistoryDetail, ProgressSummary};
use pierre_workout_tracker::session::{
    format_elapsed, RestTimerState, SessionSnapshot, SetLedger, SetRecord,
};

/// Header line with elapsed time and set progress
pub fn display_header(snapshot: &SessionSnapshot) {
    println!(
        "\n{}  {}  ({}/{} sets)",
        snapshot.workout_name,
        snapshot.elapsed_formatted,
        snapshot.completed_sets,
        snapshot.total_sets
    );
    println!("{}", "=".repeat(60));
}

/// Full workout view: every exercise with its sets
pub fn display_ledger(snapshot: &SessionSnapshot, ledger: &SetLedger) {
    display_header(snapshot);
    for (index, exercise) in ledger.exercises().iter().enumerate() {
        let prescription = exercise.prescription();
        let muscle = prescription
            .exercise
            .primary_muscle
            .as_deref()
            .map(|m| format!(" ({m})"))
            .unwrap_or_default();
        let done = if exercise.is_complete() { "  done" } else { "" };
        println!(
            "{}. {}{}  - {} x {}, rest {}{done}",
            index + 1,
            prescription.exercise.name,
            muscle,
            prescription.sets,
            prescription.reps,
            format_elapsed(u64::from(prescription.rest_interval_secs))
        );
        for set in exercise.sets() {
            println!("   {}", set_line(set));
        }
    }
    if let Some(rest) = rest_line(snapshot) {
        println!("\n{rest}");
    }
}

fn set_line(set: &SetRecord) -> String {
    let marker = if set.is_completed() { "[x]" } else { "[ ]" };
    let weight = if set.entered_weight().is_empty() {
        "-".to_owned()
    } else {
        set.entered_weight().to_owned()
    };
    let reps = if set.entered_reps().is_empty() {
        "-"
    } else {
        set.entered_reps()
    };
    let target = set.prescribed_weight().map_or_else(
        || set.prescribed_reps().to_string(),
        |w| format!("{} @ {w}", set.prescribed_reps()),
    );
    format!(
        "{marker} Set {}: {reps} reps @ {weight}  (target {target})",
        set.set_number()
    )
}

fn rest_line(snapshot: &SessionSnapshot) -> Option<String> {
    match &snapshot.rest {
        RestTimerState::Running {
            exercise_name,
            remaining,
            ..
        } => Some(format!(
            "Rest {}  after {exercise_name}  (type 'skip' to continue)",
            format_elapsed(u64::from(*remaining))
        )),
        RestTimerState::Idle => None,
    }
}

/// Countdown progress line
pub fn display_rest_remaining(remaining: u32) {
    println!("Rest {}", format_elapsed(u64::from(remaining)));
}

/// Saved workout summary
pub fn display_report(report: &CompletionReport) {
    println!("\nWorkout saved");
    println!("{}", "=".repeat(60));
    println!("   Duration: {} min", report.completed_workout.duration);
    println!("   Sets: {}", report.completed_sets.len());
    let volume: u64 = report.completed_sets.iter().map(|s| s.volume()).sum();
    if volume > 0 {
        println!("   Volume: {volume}");
    }
    println!(
        "   Completed: {}",
        report
            .completed_workout
            .date_completed
            .format("%Y-%m-%d %H:%M UTC")
    );
}

/// Dashboard totals
pub fn display_summary(summary: &ProgressSummary) {
    println!("\nProgress");
    println!("{}", "=".repeat(60));
    println!("   Total workouts: {}", summary.total_workouts);
    println!("   Total minutes: {}", summary.total_minutes);
    println!(
        "   This week (since {}): {} workouts, {} min",
        summary.week_start.format("%Y-%m-%d"),
        summary.week_workouts,
        summary.week_minutes
    );
    match summary.last_completed {
        Some(last) => println!("   Last workout: {}", last.format("%Y-%m-%d %H:%M UTC")),
        None => println!("   Last workout: none yet"),
    }
}

/// Per-exercise set history of one workout
pub fn display_history(detail: &HistoryDetail) {
    println!("\nWorkout {}", detail.workout_id);
    println!("{}", "=".repeat(60));
    if detail.exercises.is_empty() {
        println!("   No completed sets recorded");
        return;
    }
    for exercise in &detail.exercises {
        let name = exercise
            .exercise_name
            .clone()
            .unwrap_or_else(|| exercise.workout_exercise_id.to_string());
        println!("{name}");
        for set in &exercise.sets {
            match set.performed_weight {
                Some(weight) => println!(
                    "   Set {}: {} reps @ {weight}",
                    set.performed_set_order, set.performed_reps
                ),
                None => println!(
                    "   Set {}: {} reps",
                    set.performed_set_order, set.performed_reps
                ),
            }
        }
    }
    println!("\n   Total reps: {}", detail.total_reps);
    println!("   Total volume: {}", detail.total_volume);
}
