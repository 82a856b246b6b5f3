// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Backend table names, environment keys, and timer defaults for workout sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identity used in structured logs
pub mod service_names {
    /// Workout tracker service name
    pub const PIERRE_WORKOUT_TRACKER: &str = "pierre-workout-tracker";
    /// Name used for the hosted backend in error messages
    pub const WORKOUT_BACKEND: &str = "workout-backend";
}

/// Hosted backend table names
pub mod tables {
    /// Workout templates
    pub const WORKOUTS: &str = "workouts";
    /// Exercise prescriptions belonging to a workout
    pub const WORKOUT_EXERCISES: &str = "workout_exercises";
    /// One summary row per finished session
    pub const COMPLETED_WORKOUTS: &str = "completed_workouts";
    /// One row per completed set
    pub const COMPLETED_SETS: &str = "completed_sets";
}

/// Hosted backend REST paths and headers
pub mod backend {
    /// Path prefix of the row API
    pub const REST_PATH: &str = "/rest/v1";
    /// Header carrying the anon/service key
    pub const API_KEY_HEADER: &str = "apikey";
    /// Header controlling insert response bodies
    pub const PREFER_HEADER: &str = "Prefer";
    /// Do not echo inserted rows back
    pub const PREFER_RETURN_MINIMAL: &str = "return=minimal";
    /// Request id header set by the backend gateway
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
    /// Embedded select used when loading a workout's exercises
    pub const WORKOUT_EXERCISE_SELECT: &str =
        "id,sets,reps,weight,rest_interval,order_index,exercises(id,name,primary_muscle,equipment)";
}

/// Environment variable names
pub mod env_config {
    /// Tick period for the clock and rest drivers, in milliseconds
    pub const TICK_MS: &str = "PIERRE_WORKOUT_TICK_MS";
    /// Base URL of the hosted backend
    pub const BACKEND_URL: &str = "PIERRE_WORKOUT_BACKEND_URL";
    /// API key for the hosted backend
    pub const BACKEND_KEY: &str = "PIERRE_WORKOUT_BACKEND_KEY";
    /// Per-request timeout
    pub const HTTP_TIMEOUT_SECS: &str = "PIERRE_WORKOUT_HTTP_TIMEOUT_SECS";
    /// Connect timeout
    pub const CONNECT_TIMEOUT_SECS: &str = "PIERRE_WORKOUT_CONNECT_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Timer and request defaults
pub mod defaults {
    /// One tick per second of wall-clock time
    pub const TICK_MS: u64 = 1000;
    /// Default per-request timeout
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Time conversion helpers
pub mod time {
    /// Seconds per minute
    pub const MINUTE_SECONDS: i64 = 60;
}
