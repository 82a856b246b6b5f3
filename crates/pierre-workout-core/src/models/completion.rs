// ABOUTME: Completion records written to the hosted backend when a session finishes
// ABOUTME: One workout summary plus one row per completed set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary row for a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedWorkoutRecord {
    /// Workout template that was performed
    pub workout_id: Uuid,
    /// User who performed it
    pub user_id: Uuid,
    /// Completion timestamp (serialized as RFC 3339)
    pub date_completed: DateTime<Utc>,
    /// Session length in whole minutes, rounded up
    pub duration: u32,
}

/// One performed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSetRecord {
    /// Workout template that was performed
    pub workout_id: Uuid,
    /// Workout-exercise row the set belongs to
    pub workout_exercise_id: Uuid,
    /// 1-based position of the set within its exercise
    pub performed_set_order: u32,
    /// Reps actually performed
    pub performed_reps: u32,
    /// Load actually used; serialized as `null` when absent
    pub performed_weight: Option<u32>,
}

impl CompletedSetRecord {
    /// `reps × weight`, or zero for sets without a weight
    #[must_use]
    pub fn volume(&self) -> u64 {
        self.performed_weight
            .map_or(0, |w| u64::from(w) * u64::from(self.performed_reps))
    }
}

/// Everything a finished session persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    /// Exactly one summary row
    pub completed_workout: CompletedWorkoutRecord,
    /// One row per completed set, in exercise then set order
    pub completed_sets: Vec<CompletedSetRecord>,
}
