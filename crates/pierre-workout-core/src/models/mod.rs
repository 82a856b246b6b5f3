// ABOUTME: Workout domain models shared by the session engine and the stores
// ABOUTME: Re-exports templates, prescriptions, and completion records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `WorkoutTemplate`: immutable plan fetched once at session start
//! - `ExercisePrescription`: prescribed sets/reps/weight/rest for one exercise
//! - `CompletionReport`: the records a finished session persists
//!
//! Field names on the completion records match the hosted backend's columns,
//! so the records serialize straight into insert payloads.

mod completion;
mod workout;

pub use completion::{CompletedSetRecord, CompletedWorkoutRecord, CompletionReport};
pub use workout::{ExercisePrescription, ExerciseRef, WorkoutTemplate};
