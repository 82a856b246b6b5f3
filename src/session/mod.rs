// ABOUTME: Active workout session: controller owning clock, set ledger, and rest timer
// ABOUTME: Enforces session invariants at one boundary; runtime drives it with tokio timers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Active Workout Session
//!
//! [`SessionController`] is the single owned value holding everything a
//! running session knows. It is synchronous and clock-agnostic so it can be
//! unit tested directly; [`SessionRuntime`] wraps it with the periodic tick
//! drivers and the persistence collaborator.
//!
//! Ordering guarantee: `complete_set` mutates the ledger completely before it
//! starts the rest timer.

/// Free-running elapsed-time counter
pub mod clock;
/// Per-set prescribed and entered values
pub mod ledger;
/// Completion record construction and persistence
pub mod reporter;
/// Single-shot rest countdown
pub mod rest_timer;
/// Async host with tick drivers
pub mod runtime;

pub use clock::{format_elapsed, SessionClock};
pub use ledger::{ExerciseSets, SetCompletion, SetField, SetLedger, SetRecord};
pub use reporter::{CompletionProgress, CompletionReporter};
pub use rest_timer::{RestOverlay, RestTick, RestTimer, RestTimerState};
pub use runtime::{DriverWatch, SessionEvent, SessionRuntime, SessionUpdate};

use chrono::{DateTime, Utc};
use pierre_workout_core::errors::{AppResult, SessionError};
use pierre_workout_core::models::{CompletionReport, WorkoutTemplate};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Result of completing a set through the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteOutcome {
    /// `false` when the set was already completed and nothing changed
    pub newly_completed: bool,
    /// Generation of the rest countdown this completion started, if any
    pub rest_generation: Option<u64>,
}

/// Point-in-time view of a session for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Workout being performed
    pub workout_id: Uuid,
    /// Workout name
    pub workout_name: String,
    /// Seconds elapsed
    pub elapsed_seconds: u64,
    /// Seconds elapsed as `MM:SS`
    pub elapsed_formatted: String,
    /// Completed sets
    pub completed_sets: usize,
    /// All sets
    pub total_sets: usize,
    /// Whether every set is completed
    pub all_completed: bool,
    /// Rest timer state
    pub rest: RestTimerState,
    /// Whether the session was finished or abandoned
    pub closed: bool,
}

/// The in-memory state of one workout session
#[derive(Debug, Clone)]
pub struct SessionController {
    workout_id: Uuid,
    workout_name: String,
    user_id: Uuid,
    clock: SessionClock,
    ledger: SetLedger,
    rest_timer: RestTimer,
    closed: bool,
}

impl SessionController {
    /// Open a session for `template` at `now`
    #[must_use]
    pub fn start(template: &WorkoutTemplate, user_id: Uuid, now: DateTime<Utc>) -> Self {
        debug!(
            session.workout_id = %template.id,
            session.exercises = template.exercises.len(),
            session.sets = template.total_sets(),
            "Opening workout session"
        );
        Self {
            workout_id: template.id,
            workout_name: template.name.clone(),
            user_id,
            clock: SessionClock::start(now),
            ledger: SetLedger::initialize(template),
            rest_timer: RestTimer::new(),
            closed: false,
        }
    }

    /// Advance the session clock by one second
    pub fn tick_clock(&mut self) -> u64 {
        self.clock.tick();
        self.clock.elapsed_seconds()
    }

    /// Advance the rest countdown if `generation` is still current
    pub fn tick_rest(&mut self, generation: u64) -> RestTick {
        self.rest_timer.tick_generation(generation)
    }

    /// Edit the raw reps or weight text of a set.
    ///
    /// Returns `Ok(false)` when the set is completed and the edit was dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or the set does not exist
    pub fn update_entry(
        &mut self,
        exercise_id: Uuid,
        set_number: u32,
        field: SetField,
        value: impl Into<String>,
    ) -> AppResult<bool> {
        self.ensure_open()?;
        Ok(self
            .ledger
            .update_entry(exercise_id, set_number, field, value)?)
    }

    /// Complete a set and, when the exercise prescribes a rest, start the
    /// rest countdown (cancelling any countdown already running).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or the set does not exist
    pub fn complete_set(&mut self, exercise_id: Uuid, set_number: u32) -> AppResult<CompleteOutcome> {
        self.ensure_open()?;
        let SetCompletion {
            newly_completed,
            rest_interval_secs,
        } = self.ledger.complete_set(exercise_id, set_number)?;

        let rest_generation = if newly_completed && rest_interval_secs > 0 {
            let name = self
                .ledger
                .exercise(exercise_id)
                .map(|e| e.prescription().exercise.name.clone())
                .unwrap_or_default();
            self.rest_timer.start(exercise_id, name, rest_interval_secs)
        } else {
            None
        };

        debug!(
            session.workout_id = %self.workout_id,
            set.exercise_id = %exercise_id,
            set.number = set_number,
            set.newly_completed = newly_completed,
            rest.started = rest_generation.is_some(),
            "Set completed"
        );

        Ok(CompleteOutcome {
            newly_completed,
            rest_generation,
        })
    }

    /// Cancel the running rest countdown. Returns `false` when none was running.
    pub fn skip_rest(&mut self) -> bool {
        self.rest_timer.skip()
    }

    /// Whether every set is completed. Advisory: finishing is never blocked.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.ledger.all_completed()
    }

    /// Build the completion records as of `finished_at`
    #[must_use]
    pub fn build_report(&self, finished_at: DateTime<Utc>) -> CompletionReport {
        CompletionReporter::build(
            self.workout_id,
            self.user_id,
            self.clock.started_at(),
            &self.ledger,
            finished_at,
        )
    }

    /// Stop the clock and any rest countdown, and reject further edits
    pub fn close(&mut self) {
        self.clock.stop();
        self.rest_timer.skip();
        self.closed = true;
    }

    /// Display snapshot
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            workout_id: self.workout_id,
            workout_name: self.workout_name.clone(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            elapsed_formatted: self.clock.formatted(),
            completed_sets: self.ledger.completed_count(),
            total_sets: self.ledger.total_sets(),
            all_completed: self.ledger.all_completed(),
            rest: self.rest_timer.state().clone(),
            closed: self.closed,
        }
    }

    /// Workout being performed
    #[must_use]
    pub const fn workout_id(&self) -> Uuid {
        self.workout_id
    }

    /// User performing the workout
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Session clock
    #[must_use]
    pub const fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Set ledger
    #[must_use]
    pub const fn ledger(&self) -> &SetLedger {
        &self.ledger
    }

    /// Rest timer
    #[must_use]
    pub const fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    /// Whether the session was finished or abandoned
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            Err(SessionError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pierre_workout_core::errors::ErrorCode;
    use pierre_workout_core::models::{ExercisePrescription, ExerciseRef};

    fn single_exercise(sets: u32, reps: u32, rest: u32) -> WorkoutTemplate {
        WorkoutTemplate {
            id: Uuid::new_v4(),
            name: "Push".into(),
            exercises: vec![ExercisePrescription {
                workout_exercise_id: Uuid::new_v4(),
                exercise: ExerciseRef {
                    id: Uuid::new_v4(),
                    name: "Push-up".into(),
                    primary_muscle: Some("Chest".into()),
                    equipment: None,
                },
                sets,
                reps,
                weight: None,
                rest_interval_secs: rest,
                order_index: 0,
            }],
        }
    }

    #[test]
    fn completion_starts_rest_with_prescribed_interval() {
        let template = single_exercise(3, 10, 60);
        let id = template.exercises[0].workout_exercise_id;
        let mut session = SessionController::start(&template, Uuid::new_v4(), Utc::now());

        let outcome = session.complete_set(id, 1).unwrap();
        assert!(outcome.rest_generation.is_some());
        assert_eq!(
            session.rest_timer().state(),
            &RestTimerState::Running {
                exercise_id: id,
                exercise_name: "Push-up".into(),
                remaining: 60,
            }
        );
    }

    #[test]
    fn repeated_completion_does_not_restart_rest() {
        let template = single_exercise(2, 10, 60);
        let id = template.exercises[0].workout_exercise_id;
        let mut session = SessionController::start(&template, Uuid::new_v4(), Utc::now());

        let first = session.complete_set(id, 1).unwrap();
        session.tick_rest(first.rest_generation.unwrap());
        let again = session.complete_set(id, 1).unwrap();

        assert!(!again.newly_completed);
        assert_eq!(again.rest_generation, None);
        assert_eq!(session.rest_timer().remaining(), Some(59));
    }

    #[test]
    fn zero_rest_interval_leaves_timer_idle() {
        let template = single_exercise(1, 10, 0);
        let id = template.exercises[0].workout_exercise_id;
        let mut session = SessionController::start(&template, Uuid::new_v4(), Utc::now());

        let outcome = session.complete_set(id, 1).unwrap();
        assert_eq!(outcome.rest_generation, None);
        assert!(!session.rest_timer().is_running());
    }

    #[test]
    fn clock_advances_independently_of_rest() {
        let template = single_exercise(2, 10, 2);
        let id = template.exercises[0].workout_exercise_id;
        let mut session = SessionController::start(&template, Uuid::new_v4(), Utc::now());

        session.tick_clock();
        let generation = session.complete_set(id, 1).unwrap().rest_generation.unwrap();
        session.tick_clock();
        session.skip_rest();
        session.tick_rest(generation);
        assert_eq!(session.tick_clock(), 3);
    }

    #[test]
    fn closed_session_rejects_edits() {
        let template = single_exercise(1, 10, 30);
        let id = template.exercises[0].workout_exercise_id;
        let mut session = SessionController::start(&template, Uuid::new_v4(), Utc::now());
        session.close();

        let err = session.complete_set(id, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceLocked);
        assert_eq!(session.tick_clock(), 0);
        assert!(session.snapshot().closed);
    }

    #[test]
    fn report_uses_start_instant_and_only_completed_sets() {
        let start = Utc::now();
        let template = single_exercise(3, 10, 0);
        let id = template.exercises[0].workout_exercise_id;
        let user = Uuid::new_v4();
        let mut session = SessionController::start(&template, user, start);

        session.complete_set(id, 2).unwrap();
        let report = session.build_report(start + Duration::seconds(61));

        assert_eq!(report.completed_workout.user_id, user);
        assert_eq!(report.completed_workout.duration, 2);
        assert_eq!(report.completed_sets.len(), 1);
        assert_eq!(report.completed_sets[0].performed_set_order, 2);
    }
}
