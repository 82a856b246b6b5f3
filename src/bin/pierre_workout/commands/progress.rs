// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Progress commands for pierre-workout
// ABOUTME: Prints dashboard totals and the set history of a finished workout

use chrono::Utc;
use pierre_workout_tracker::errors::AppResult;
use pierre_workout_tracker::models::WorkoutTemplate;
use pierre_workout_tracker::progress::{HistoryDetail, ProgressSummary};
use pierre_workout_tracker::store::WorkoutStore;
use tracing::{info, warn};
use uuid::Uuid;

use crate::helpers::display::{display_history, display_summary};

/// Print totals for a user
pub async fn summary(store: &dyn WorkoutStore, user_id: Uuid) -> AppResult<()> {
    info!(user.id = %user_id, "Loading progress summary");
    let summary = ProgressSummary::load(store, user_id, Utc::now()).await?;
    display_summary(&summary);
    Ok(())
}

/// Print the set history of one workout, naming exercises when the template
/// can still be loaded
pub async fn history(
    store: &dyn WorkoutStore,
    workout_id: Uuid,
    template: Option<WorkoutTemplate>,
) -> AppResult<()> {
    let template = match template {
        Some(template) => Some(template),
        None => match store.fetch_template(workout_id).await {
            Ok(template) => Some(template),
            Err(e) => {
                warn!("Showing history without exercise names: {e}");
                None
            }
        },
    };
    let detail = HistoryDetail::load(store, workout_id, template.as_ref()).await?;
    display_history(&detail);
    Ok(())
}
