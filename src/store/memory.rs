// ABOUTME: In-memory workout store for local sessions and tests
// ABOUTME: Supports injected write failures to exercise the keep-session-open path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use pierre_workout_core::constants::service_names;
use pierre_workout_core::errors::{AppError, AppResult};
use pierre_workout_core::models::{CompletedSetRecord, CompletedWorkoutRecord, WorkoutTemplate};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::WorkoutStore;

#[derive(Debug, Default)]
struct StoreState {
    templates: HashMap<Uuid, WorkoutTemplate>,
    completed_workouts: Vec<CompletedWorkoutRecord>,
    completed_sets: Vec<CompletedSetRecord>,
    failing_writes: u32,
    failing_set_writes: u32,
}

/// Workout store held entirely in process memory
///
/// Clones share the same state, so a test can keep one handle for inspection
/// while the session runtime owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkoutStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryWorkoutStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with templates
    #[must_use]
    pub fn with_templates(templates: impl IntoIterator<Item = WorkoutTemplate>) -> Self {
        let templates = templates.into_iter().map(|t| (t.id, t)).collect();
        Self {
            state: Arc::new(RwLock::new(StoreState {
                templates,
                ..StoreState::default()
            })),
        }
    }

    /// Add or replace a template
    pub async fn insert_template(&self, template: WorkoutTemplate) {
        self.state.write().await.templates.insert(template.id, template);
    }

    /// Make the next `count` writes of either kind fail without storing anything
    pub async fn fail_next_writes(&self, count: u32) {
        self.state.write().await.failing_writes = count;
    }

    /// Make the next `count` set writes fail while summary writes succeed
    pub async fn fail_next_set_writes(&self, count: u32) {
        self.state.write().await.failing_set_writes = count;
    }

    /// Every summary record written so far, in write order
    pub async fn completed_workouts(&self) -> Vec<CompletedWorkoutRecord> {
        self.state.read().await.completed_workouts.clone()
    }

    /// Every set record written so far, in write order
    pub async fn completed_sets(&self) -> Vec<CompletedSetRecord> {
        self.state.read().await.completed_sets.clone()
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn fetch_template(&self, workout_id: Uuid) -> AppResult<WorkoutTemplate> {
        let state = self.state.read().await;
        let mut template = state
            .templates
            .get(&workout_id)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("Workout {workout_id}"))
                    .with_resource_id(workout_id.to_string())
            })?;
        drop(state);
        template.sort_by_order();
        Ok(template)
    }

    async fn record_summary(&self, summary: &CompletedWorkoutRecord) -> AppResult<()> {
        let mut state = self.state.write().await;
        take_injected_failure(&mut state.failing_writes)?;
        state.completed_workouts.push(summary.clone());
        debug!(
            store.workouts = state.completed_workouts.len(),
            "Stored workout summary in memory"
        );
        Ok(())
    }

    async fn record_sets(&self, sets: &[CompletedSetRecord]) -> AppResult<()> {
        let mut state = self.state.write().await;
        take_injected_failure(&mut state.failing_writes)?;
        take_injected_failure(&mut state.failing_set_writes)?;
        state.completed_sets.extend(sets.iter().cloned());
        debug!(
            store.sets = state.completed_sets.len(),
            "Stored completed sets in memory"
        );
        Ok(())
    }

    async fn list_completed_workouts(&self, user_id: Uuid) -> AppResult<Vec<CompletedWorkoutRecord>> {
        let mut workouts: Vec<_> = self
            .state
            .read()
            .await
            .completed_workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date_completed.cmp(&a.date_completed));
        Ok(workouts)
    }

    async fn list_completed_sets(&self, workout_id: Uuid) -> AppResult<Vec<CompletedSetRecord>> {
        Ok(self
            .state
            .read()
            .await
            .completed_sets
            .iter()
            .filter(|s| s.workout_id == workout_id)
            .cloned()
            .collect())
    }
}

fn take_injected_failure(remaining: &mut u32) -> AppResult<()> {
    if *remaining == 0 {
        return Ok(());
    }
    *remaining -= 1;
    Err(AppError::external_unavailable(
        service_names::WORKOUT_BACKEND,
        "injected write failure",
    ))
}

/// Read a JSON workout template from disk, ordered by `order_index`
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a template
pub async fn load_template_file(path: &Path) -> AppResult<WorkoutTemplate> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read template {}: {e}", path.display()))
            .with_source(e)
    })?;
    let mut template: WorkoutTemplate = serde_json::from_str(&raw)?;
    template.sort_by_order();
    debug!(
        template.id = %template.id,
        template.exercises = template.exercises.len(),
        "Loaded workout template from {}",
        path.display()
    );
    Ok(template)
}
