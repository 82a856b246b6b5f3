// ABOUTME: Progress views over completed workouts: dashboard totals and per-workout history
// ABOUTME: Pure aggregation over store records; callers supply `now` for the weekly window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress
//!
//! Aggregates the records the completion reporter writes. The weekly window
//! starts Sunday 00:00 UTC.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use pierre_workout_core::errors::AppResult;
use pierre_workout_core::models::{CompletedSetRecord, CompletedWorkoutRecord, WorkoutTemplate};
use serde::Serialize;
use uuid::Uuid;

use crate::store::WorkoutStore;

/// Dashboard totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    /// Completed workouts, all time
    pub total_workouts: usize,
    /// Minutes trained, all time
    pub total_minutes: u64,
    /// Completed workouts since the start of the current week
    pub week_workouts: usize,
    /// Minutes trained since the start of the current week
    pub week_minutes: u64,
    /// Start of the current week
    pub week_start: DateTime<Utc>,
    /// Most recent completion
    pub last_completed: Option<DateTime<Utc>>,
}

impl ProgressSummary {
    /// Aggregate `workouts` relative to `now`
    #[must_use]
    pub fn from_records(workouts: &[CompletedWorkoutRecord], now: DateTime<Utc>) -> Self {
        let week_start = start_of_week(now);
        let (week_workouts, week_minutes) = workouts
            .iter()
            .filter(|w| w.date_completed >= week_start)
            .fold((0, 0_u64), |(count, minutes), w| {
                (count + 1, minutes + u64::from(w.duration))
            });

        Self {
            total_workouts: workouts.len(),
            total_minutes: workouts.iter().map(|w| u64::from(w.duration)).sum(),
            week_workouts,
            week_minutes,
            week_start,
            last_completed: workouts.iter().map(|w| w.date_completed).max(),
        }
    }

    /// Load a user's history from the store and aggregate it
    ///
    /// # Errors
    ///
    /// Returns the store error if history cannot be read
    pub async fn load<S>(store: &S, user_id: Uuid, now: DateTime<Utc>) -> AppResult<Self>
    where
        S: WorkoutStore + ?Sized,
    {
        let workouts = store.list_completed_workouts(user_id).await?;
        Ok(Self::from_records(&workouts, now))
    }
}

/// Sunday 00:00 UTC on or before `now`
#[must_use]
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
    (now.date_naive() - Duration::days(days_since_sunday))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Sets performed for one exercise of a finished workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseHistory {
    /// Workout-exercise the sets belong to
    pub workout_exercise_id: Uuid,
    /// Exercise name, when the template is known
    pub exercise_name: Option<String>,
    /// Sets ordered by `performed_set_order`
    pub sets: Vec<CompletedSetRecord>,
}

/// Detail view of one finished workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDetail {
    /// Workout id
    pub workout_id: Uuid,
    /// Exercises in the order their first set appears
    pub exercises: Vec<ExerciseHistory>,
    /// Sum of reps × weight over sets that carry a weight
    pub total_volume: u64,
    /// Sum of reps over all sets
    pub total_reps: u64,
}

impl HistoryDetail {
    /// Group set records by exercise; `template` supplies names
    #[must_use]
    pub fn from_records(
        workout_id: Uuid,
        sets: &[CompletedSetRecord],
        template: Option<&WorkoutTemplate>,
    ) -> Self {
        let mut exercises: Vec<ExerciseHistory> = Vec::new();
        for set in sets.iter().filter(|s| s.workout_id == workout_id) {
            if let Some(group) = exercises
                .iter_mut()
                .find(|e| e.workout_exercise_id == set.workout_exercise_id)
            {
                group.sets.push(set.clone());
            } else {
                exercises.push(ExerciseHistory {
                    workout_exercise_id: set.workout_exercise_id,
                    exercise_name: template
                        .and_then(|t| t.prescription(set.workout_exercise_id))
                        .map(|p| p.exercise.name.clone()),
                    sets: vec![set.clone()],
                });
            }
        }
        for group in &mut exercises {
            group.sets.sort_by_key(|s| s.performed_set_order);
        }

        let all_sets = || exercises.iter().flat_map(|e| e.sets.iter());
        let total_volume = all_sets().map(CompletedSetRecord::volume).sum();
        let total_reps = all_sets().map(|s| u64::from(s.performed_reps)).sum();

        Self {
            workout_id,
            exercises,
            total_volume,
            total_reps,
        }
    }

    /// Load a workout's sets from the store and group them
    ///
    /// # Errors
    ///
    /// Returns the store error if the sets cannot be read
    pub async fn load<S>(
        store: &S,
        workout_id: Uuid,
        template: Option<&WorkoutTemplate>,
    ) -> AppResult<Self>
    where
        S: WorkoutStore + ?Sized,
    {
        let sets = store.list_completed_sets(workout_id).await?;
        Ok(Self::from_records(workout_id, &sets, template))
    }
}
