// ABOUTME: Persistence abstraction for workout templates and completion records
// ABOUTME: Backed by an in-memory store for local use and a PostgREST backend over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Store
//!
//! The session never talks to a backend directly. It reads a template when it
//! starts and writes one [`CompletionReport`] when it finishes, both through
//! [`WorkoutStore`]. The history reads feed the progress views.

/// Process-local store
pub mod memory;
/// `PostgREST` backend over `reqwest`
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use pierre_workout_core::errors::AppResult;
use pierre_workout_core::models::{
    CompletedSetRecord, CompletedWorkoutRecord, CompletionReport, WorkoutTemplate,
};
use tracing::info;
use uuid::Uuid;

use crate::config::SessionConfig;

pub use memory::{load_template_file, InMemoryWorkoutStore};
pub use rest::RestWorkoutStore;

/// Core persistence trait
///
/// Implementations must be shareable across tasks; the session runtime holds
/// its store behind an `Arc`.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Load a workout and its prescriptions ordered by `order_index`
    async fn fetch_template(&self, workout_id: Uuid) -> AppResult<WorkoutTemplate>;

    /// Persist one session summary record
    async fn record_summary(&self, summary: &CompletedWorkoutRecord) -> AppResult<()>;

    /// Persist completed set records as one write; all or nothing
    async fn record_sets(&self, sets: &[CompletedSetRecord]) -> AppResult<()>;

    /// Persist the summary record, then every completed set record
    async fn record_completion(&self, report: &CompletionReport) -> AppResult<()> {
        self.record_summary(&report.completed_workout).await?;
        self.record_sets(&report.completed_sets).await
    }

    /// Completed workouts for a user, most recent first
    async fn list_completed_workouts(&self, user_id: Uuid) -> AppResult<Vec<CompletedWorkoutRecord>>;

    /// Completed set records for one workout
    async fn list_completed_sets(&self, workout_id: Uuid) -> AppResult<Vec<CompletedSetRecord>>;
}

/// Pick the backend the configuration asks for
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built
pub fn store_from_config(config: &SessionConfig) -> AppResult<Arc<dyn WorkoutStore>> {
    match &config.backend {
        Some(backend) => {
            info!(backend.url = %backend.url, "Using REST workout store");
            Ok(Arc::new(RestWorkoutStore::new(backend)?))
        }
        None => {
            info!("No backend configured, using in-memory workout store");
            Ok(Arc::new(InMemoryWorkoutStore::new()))
        }
    }
}
