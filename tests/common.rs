// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, workout templates, and session configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_workout_tracker`

use std::env;
use std::sync::{Arc, Once};
use std::time::Duration;

use pierre_workout_tracker::config::SessionConfig;
use pierre_workout_tracker::models::{ExercisePrescription, ExerciseRef, WorkoutTemplate};
use pierre_workout_tracker::session::{DriverWatch, SessionRuntime};
use pierre_workout_tracker::store::InMemoryWorkoutStore;
use tokio::task;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// One-second ticks, in-memory store
pub fn test_config() -> SessionConfig {
    SessionConfig::default().with_tick_interval(Duration::from_secs(1))
}

/// Prescription with a fresh workout-exercise id
pub fn prescription(
    name: &str,
    sets: u32,
    reps: u32,
    weight: Option<f64>,
    rest_interval_secs: u32,
    order_index: u32,
) -> ExercisePrescription {
    ExercisePrescription {
        workout_exercise_id: Uuid::new_v4(),
        exercise: ExerciseRef {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            primary_muscle: None,
            equipment: None,
        },
        sets,
        reps,
        weight,
        rest_interval_secs,
        order_index,
    }
}

/// One bodyweight exercise, 3 sets of 10 with a 60 second rest
pub fn push_day_template() -> WorkoutTemplate {
    WorkoutTemplate {
        id: Uuid::new_v4(),
        name: "Push Day".to_owned(),
        exercises: vec![prescription("Push-up", 3, 10, None, 60, 0)],
    }
}

/// Two loaded exercises: squat 3x5 @ 100 and row 2x8 @ 60, no rests
pub fn strength_template() -> WorkoutTemplate {
    WorkoutTemplate {
        id: Uuid::new_v4(),
        name: "Strength".to_owned(),
        exercises: vec![
            prescription("Barbell Squat", 3, 5, Some(100.0), 0, 0),
            prescription("Barbell Row", 2, 8, Some(60.0), 0, 1),
        ],
    }
}

/// Store seeded with `template`, plus a handle for inspecting writes
pub fn seeded_store(
    template: &WorkoutTemplate,
) -> (InMemoryWorkoutStore, Arc<InMemoryWorkoutStore>) {
    let store = InMemoryWorkoutStore::with_templates([template.clone()]);
    let shared = Arc::new(store.clone());
    (store, shared)
}

/// Started session over a seeded in-memory store
pub async fn start_session(
    template: &WorkoutTemplate,
) -> (InMemoryWorkoutStore, SessionRuntime<InMemoryWorkoutStore>) {
    init_test_logging();
    let (store, shared) = seeded_store(template);
    let session = SessionRuntime::start(shared, template.id, Uuid::new_v4(), &test_config())
        .await
        .unwrap();
    (store, session)
}

/// Yield until aborted driver tasks have been reaped, up to a bounded number
/// of scheduler turns
pub async fn settle_drivers(watch: &DriverWatch, expected: usize) {
    for _ in 0..32 {
        if watch.active() == expected {
            return;
        }
        task::yield_now().await;
    }
}
