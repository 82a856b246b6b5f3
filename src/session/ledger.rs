// ABOUTME: Set ledger holding prescribed and entered values for every set in a session
// ABOUTME: Entries stay editable free text until a set is completed, then freeze
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Set Ledger
//!
//! One [`SetRecord`] per prescribed set, grouped by workout exercise in
//! template order. Reps and weight are held as raw text exactly as the user
//! typed them; numeric coercion happens only when the session is reported.

use std::fmt;
use std::str::FromStr;

use pierre_workout_core::errors::{AppError, SessionError};
use pierre_workout_core::models::{ExercisePrescription, WorkoutTemplate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editable field of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetField {
    /// Reps performed
    Reps,
    /// Load used
    Weight,
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reps => write!(f, "reps"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

impl FromStr for SetField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reps" | "r" => Ok(Self::Reps),
            "weight" | "w" => Ok(Self::Weight),
            other => Err(AppError::invalid_input(format!(
                "Unknown set field '{other}', expected 'reps' or 'weight'"
            ))),
        }
    }
}

/// Mutable state of one prescribed set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRecord {
    set_number: u32,
    prescribed_reps: u32,
    prescribed_weight: Option<f64>,
    entered_reps: String,
    entered_weight: String,
    completed: bool,
}

impl SetRecord {
    fn seeded(set_number: u32, prescription: &ExercisePrescription) -> Self {
        Self {
            set_number,
            prescribed_reps: prescription.reps,
            prescribed_weight: prescription.weight,
            entered_reps: prescription.reps.to_string(),
            entered_weight: prescription
                .weight
                .map(|w| w.to_string())
                .unwrap_or_default(),
            completed: false,
        }
    }

    /// 1-based position within the exercise
    #[must_use]
    pub const fn set_number(&self) -> u32 {
        self.set_number
    }

    /// Reps the template asked for
    #[must_use]
    pub const fn prescribed_reps(&self) -> u32 {
        self.prescribed_reps
    }

    /// Load the template asked for
    #[must_use]
    pub const fn prescribed_weight(&self) -> Option<f64> {
        self.prescribed_weight
    }

    /// Reps as typed by the user
    #[must_use]
    pub fn entered_reps(&self) -> &str {
        &self.entered_reps
    }

    /// Weight as typed by the user
    #[must_use]
    pub fn entered_weight(&self) -> &str {
        &self.entered_weight
    }

    /// Whether the set has been completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// All sets of one workout exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSets {
    prescription: ExercisePrescription,
    sets: Vec<SetRecord>,
}

impl ExerciseSets {
    /// Prescription the sets were seeded from
    #[must_use]
    pub const fn prescription(&self) -> &ExercisePrescription {
        &self.prescription
    }

    /// Workout-exercise id
    #[must_use]
    pub const fn exercise_id(&self) -> Uuid {
        self.prescription.workout_exercise_id
    }

    /// Sets in order
    #[must_use]
    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    /// Whether every set of this exercise is completed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sets.iter().all(SetRecord::is_completed)
    }

    fn set_mut(&mut self, set_number: u32) -> Result<&mut SetRecord, SessionError> {
        let available = self.sets.len() as u32;
        let exercise_id = self.exercise_id();
        set_number
            .checked_sub(1)
            .and_then(|idx| self.sets.get_mut(idx as usize))
            .ok_or_else(|| SessionError::unknown_set(exercise_id, set_number, available))
    }
}

/// Result of a `complete_set` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCompletion {
    /// `false` when the set had already been completed (the call was a no-op)
    pub newly_completed: bool,
    /// Rest interval prescribed for the exercise, in seconds
    pub rest_interval_secs: u32,
}

/// Per-set state for every exercise in the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetLedger {
    exercises: Vec<ExerciseSets>,
}

impl SetLedger {
    /// Build the ledger from a template: `sets` records per prescription,
    /// seeded with the prescribed reps and weight, none completed.
    #[must_use]
    pub fn initialize(template: &WorkoutTemplate) -> Self {
        let exercises = template
            .exercises
            .iter()
            .map(|prescription| ExerciseSets {
                sets: (1..=prescription.sets)
                    .map(|n| SetRecord::seeded(n, prescription))
                    .collect(),
                prescription: prescription.clone(),
            })
            .collect();
        Self { exercises }
    }

    /// Replace the raw text of one field.
    ///
    /// Returns `Ok(false)` without touching anything when the set is already
    /// completed. Any text is accepted, including partial or empty input.
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise or set does not exist
    pub fn update_entry(
        &mut self,
        exercise_id: Uuid,
        set_number: u32,
        field: SetField,
        value: impl Into<String>,
    ) -> Result<bool, SessionError> {
        let record = self.exercise_mut(exercise_id)?.set_mut(set_number)?;
        if record.completed {
            return Ok(false);
        }
        match field {
            SetField::Reps => record.entered_reps = value.into(),
            SetField::Weight => record.entered_weight = value.into(),
        }
        Ok(true)
    }

    /// Mark a set completed. Completing an already-completed set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise or set does not exist
    pub fn complete_set(
        &mut self,
        exercise_id: Uuid,
        set_number: u32,
    ) -> Result<SetCompletion, SessionError> {
        let exercise = self.exercise_mut(exercise_id)?;
        let rest_interval_secs = exercise.prescription.rest_interval_secs;
        let record = exercise.set_mut(set_number)?;
        let newly_completed = !record.completed;
        record.completed = true;
        Ok(SetCompletion {
            newly_completed,
            rest_interval_secs,
        })
    }

    /// True iff every set of every exercise is completed. Advisory only.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.exercises.iter().all(ExerciseSets::is_complete)
    }

    /// Number of completed sets
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.records().filter(|(_, r)| r.completed).count()
    }

    /// Number of sets in the ledger
    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Exercises in template order
    #[must_use]
    pub fn exercises(&self) -> &[ExerciseSets] {
        &self.exercises
    }

    /// Look up one exercise
    #[must_use]
    pub fn exercise(&self, exercise_id: Uuid) -> Option<&ExerciseSets> {
        self.exercises.iter().find(|e| e.exercise_id() == exercise_id)
    }

    /// Every record paired with its exercise, in exercise then set order
    pub fn records(&self) -> impl Iterator<Item = (&ExerciseSets, &SetRecord)> {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter().map(move |r| (e, r)))
    }

    fn exercise_mut(&mut self, exercise_id: Uuid) -> Result<&mut ExerciseSets, SessionError> {
        self.exercises
            .iter_mut()
            .find(|e| e.exercise_id() == exercise_id)
            .ok_or(SessionError::unknown_exercise(exercise_id))
    }
}
