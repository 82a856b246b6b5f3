// ABOUTME: Session-specific error types for the active workout state machine
// ABOUTME: Provides structured errors that convert into the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Error Types
//!
//! Errors raised by the set ledger and the session controller. Note what is
//! *not* here: editing a completed set, completing a set twice, and restarting
//! a rest timer are all defined no-ops, not faults.

use std::error::Error;
use std::fmt;

use uuid::Uuid;

use super::{AppError, ErrorCode};

/// Errors specific to session operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No exercise with this workout-exercise id in the session
    UnknownExercise {
        /// Workout-exercise id that was requested
        exercise_id: Uuid,
    },
    /// The exercise has no set with this 1-based number
    UnknownSet {
        /// Workout-exercise id
        exercise_id: Uuid,
        /// Requested 1-based set number
        set_number: u32,
        /// Number of sets the exercise actually has
        available: u32,
    },
    /// The session was already finished or abandoned
    SessionClosed,
}

impl SessionError {
    /// Create an "unknown exercise" error
    #[must_use]
    pub const fn unknown_exercise(exercise_id: Uuid) -> Self {
        Self::UnknownExercise { exercise_id }
    }

    /// Create an "unknown set" error
    #[must_use]
    pub const fn unknown_set(exercise_id: Uuid, set_number: u32, available: u32) -> Self {
        Self::UnknownSet {
            exercise_id,
            set_number,
            available,
        }
    }

    /// Map to the closest standard error code
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownExercise { .. } | Self::UnknownSet { .. } => ErrorCode::ResourceNotFound,
            Self::SessionClosed => ErrorCode::ResourceLocked,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownExercise { exercise_id } => {
                write!(f, "Exercise '{exercise_id}' is not part of this session")
            }
            Self::UnknownSet {
                exercise_id,
                set_number,
                available,
            } => {
                write!(
                    f,
                    "Set {set_number} does not exist for exercise '{exercise_id}' (has {available} sets)"
                )
            }
            Self::SessionClosed => write!(f, "Session is already closed"),
        }
    }
}

impl Error for SessionError {}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        let resource_id = match &error {
            SessionError::UnknownExercise { exercise_id }
            | SessionError::UnknownSet { exercise_id, .. } => Some(exercise_id.to_string()),
            SessionError::SessionClosed => None,
        };
        let app = Self::new(error.code(), error.to_string());
        match resource_id {
            Some(id) => app.with_resource_id(id),
            None => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_set_converts_to_not_found_with_resource() {
        let id = Uuid::new_v4();
        let app: AppError = SessionError::unknown_set(id, 4, 3).into();
        assert_eq!(app.code, ErrorCode::ResourceNotFound);
        assert_eq!(app.resource_id, Some(id.to_string()));
        assert!(app.message.contains("Set 4"));
    }

    #[test]
    fn closed_session_is_locked() {
        let app: AppError = SessionError::SessionClosed.into();
        assert_eq!(app.code, ErrorCode::ResourceLocked);
        assert!(app.resource_id.is_none());
    }
}
