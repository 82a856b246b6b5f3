// ABOUTME: Integration tests for progress summaries and per-workout history
// ABOUTME: Finishes real sessions into the in-memory store and aggregates what was written
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use pierre_workout_tracker::progress::{start_of_week, HistoryDetail, ProgressSummary};
use pierre_workout_tracker::session::{SessionRuntime, SetField};
use pierre_workout_tracker::store::InMemoryWorkoutStore;
use uuid::Uuid;

#[tokio::test(start_paused = true)]
async fn test_summary_counts_this_week_separately() {
    common::init_test_logging();
    let template = common::push_day_template();
    let exercise = template.exercises[0].workout_exercise_id;
    let store = InMemoryWorkoutStore::with_templates([template.clone()]);
    let user = Uuid::new_v4();

    // Wednesday 2025-06-11 18:00 UTC; the week began Sunday 2025-06-08
    let now = Utc.with_ymd_and_hms(2025, 6, 11, 18, 0, 0).unwrap();
    let finishes = [
        now - Duration::days(10),
        now - Duration::days(2),
        now - Duration::hours(1),
    ];

    for finished_at in finishes {
        let mut session = SessionRuntime::with_template(
            Arc::new(store.clone()),
            &template,
            user,
            &common::test_config(),
        );
        session.complete_set(exercise, 1).unwrap();
        // finishing before the wall-clock start counts as zero minutes
        let report = session.finish_at(finished_at).await.unwrap();
        assert_eq!(report.completed_workout.date_completed, finished_at);
        assert_eq!(report.completed_workout.duration, 0);
    }

    let summary = ProgressSummary::load(&store, user, now).await.unwrap();
    assert_eq!(summary.total_workouts, 3);
    assert_eq!(summary.week_workouts, 2);
    assert_eq!(summary.last_completed, Some(now - Duration::hours(1)));
    assert_eq!(
        summary.week_start,
        Utc.with_ymd_and_hms(2025, 6, 8, 0, 0, 0).unwrap()
    );
    assert_eq!(summary.week_start, start_of_week(now));

    let other = ProgressSummary::load(&store, Uuid::new_v4(), now)
        .await
        .unwrap();
    assert_eq!(other.total_workouts, 0);
    assert_eq!(other.last_completed, None);
}

#[tokio::test(start_paused = true)]
async fn test_history_groups_sets_by_exercise() {
    let template = common::strength_template();
    let squat = template.exercises[0].workout_exercise_id;
    let row = template.exercises[1].workout_exercise_id;
    let (store, mut session) = common::start_session(&template).await;

    session.complete_set(row, 2).unwrap();
    session.complete_set(squat, 2).unwrap();
    session.update_entry(squat, 1, SetField::Reps, "4").unwrap();
    session.complete_set(squat, 1).unwrap();
    session.finish().await.unwrap();

    let detail = HistoryDetail::load(&store, template.id, Some(&template))
        .await
        .unwrap();

    assert_eq!(detail.exercises.len(), 2);
    let squats = &detail.exercises[0];
    assert_eq!(squats.exercise_name.as_deref(), Some("Barbell Squat"));
    let orders: Vec<u32> = squats.sets.iter().map(|s| s.performed_set_order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert_eq!(detail.exercises[1].exercise_name.as_deref(), Some("Barbell Row"));

    // 4x100 + 5x100 + 8x60
    assert_eq!(detail.total_reps, 17);
    assert_eq!(detail.total_volume, 1380);

    let unnamed = HistoryDetail::load(&store, template.id, None).await.unwrap();
    assert!(unnamed.exercises.iter().all(|e| e.exercise_name.is_none()));
}

#[tokio::test(start_paused = true)]
async fn test_history_for_unknown_workout_is_empty() {
    let (store, _session) = common::start_session(&common::push_day_template()).await;

    let detail = HistoryDetail::load(&store, Uuid::new_v4(), None)
        .await
        .unwrap();
    assert!(detail.exercises.is_empty());
    assert_eq!(detail.total_volume, 0);
}
