// ABOUTME: Workout template models: the template, its prescriptions, and exercise references
// ABOUTME: Immutable for the duration of a session; owned by the hosted backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an exercise in the exercise library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRef {
    /// Library exercise id
    pub id: Uuid,
    /// Display name ("Barbell Squat")
    pub name: String,
    /// Primary muscle label, shown next to the exercise name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,
    /// Equipment label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}

/// Target values for one exercise within a workout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Id of the workout-exercise row; the session keys every set by this id
    pub workout_exercise_id: Uuid,
    /// The exercise being prescribed
    pub exercise: ExerciseRef,
    /// Number of sets
    pub sets: u32,
    /// Reps per set
    pub reps: u32,
    /// Load per set, absent for bodyweight work
    #[serde(default)]
    pub weight: Option<f64>,
    /// Pause after each completed set, in seconds
    #[serde(default)]
    pub rest_interval_secs: u32,
    /// Position within the workout
    #[serde(default)]
    pub order_index: u32,
}

/// A workout plan as fetched at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Workout id
    pub id: Uuid,
    /// Workout name
    pub name: String,
    /// Prescriptions in display order
    pub exercises: Vec<ExercisePrescription>,
}

impl WorkoutTemplate {
    /// Total number of prescribed sets across all exercises
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    /// Look up a prescription by workout-exercise id
    #[must_use]
    pub fn prescription(&self, workout_exercise_id: Uuid) -> Option<&ExercisePrescription> {
        self.exercises
            .iter()
            .find(|e| e.workout_exercise_id == workout_exercise_id)
    }

    /// Sort prescriptions by `order_index`, keeping ties in fetch order
    pub fn sort_by_order(&mut self) {
        self.exercises.sort_by_key(|e| e.order_index);
    }
}
