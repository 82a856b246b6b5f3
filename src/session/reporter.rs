// ABOUTME: Completion reporter turning the in-memory session into persisted records
// ABOUTME: Applies lenient numeric coercion and writes through the WorkoutStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Completion Reporter
//!
//! The reporter applies no gating: it reports whatever the ledger holds, and
//! incomplete sets are simply left out. Invalid numeric input degrades
//! instead of failing (reps become 0, weight becomes absent).

use std::time::Instant;

use chrono::{DateTime, Utc};
use pierre_workout_core::constants::time::MINUTE_SECONDS;
use pierre_workout_core::errors::AppResult;
use pierre_workout_core::models::{CompletedSetRecord, CompletedWorkoutRecord, CompletionReport};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ledger::SetLedger;
use crate::store::WorkoutStore;

/// Builds and persists completion reports
pub struct CompletionReporter;

impl CompletionReporter {
    /// Materialize the records for a finished session
    #[must_use]
    pub fn build(
        workout_id: Uuid,
        user_id: Uuid,
        started_at: DateTime<Utc>,
        ledger: &SetLedger,
        finished_at: DateTime<Utc>,
    ) -> CompletionReport {
        let completed_sets = ledger
            .records()
            .filter(|(_, record)| record.is_completed())
            .map(|(exercise, record)| CompletedSetRecord {
                workout_id,
                workout_exercise_id: exercise.exercise_id(),
                performed_set_order: record.set_number(),
                performed_reps: parse_performed_reps(record.entered_reps()),
                performed_weight: parse_performed_weight(record.entered_weight()),
            })
            .collect();

        CompletionReport {
            completed_workout: CompletedWorkoutRecord {
                workout_id,
                user_id,
                date_completed: finished_at,
                duration: duration_minutes(started_at, finished_at),
            },
            completed_sets,
        }
    }

    /// Write a report through the store, summary first.
    ///
    /// A summary stored by an earlier attempt is not written again: the
    /// report reuses it and only the set rows are sent.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged; the caller keeps the session open
    pub async fn persist<S>(
        store: &S,
        mut report: CompletionReport,
        progress: &mut CompletionProgress,
    ) -> AppResult<CompletionReport>
    where
        S: WorkoutStore + ?Sized,
    {
        let start = Instant::now();
        let workout_id = report.completed_workout.workout_id;
        let result = async {
            if let Some(summary) = &progress.stored_summary {
                debug!(
                    session.workout_id = %workout_id,
                    "Summary already stored, writing set rows only"
                );
                report.completed_workout = summary.clone();
            } else {
                store.record_summary(&report.completed_workout).await?;
                progress.stored_summary = Some(report.completed_workout.clone());
            }
            store.record_sets(&report.completed_sets).await
        }
        .await;

        match result {
            Ok(()) => {
                info!(
                    session.workout_id = %workout_id,
                    report.sets = report.completed_sets.len(),
                    report.duration_minutes = report.completed_workout.duration,
                    store.duration_ms = start.elapsed().as_millis() as u64,
                    "Workout completion recorded"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(
                    session.workout_id = %workout_id,
                    error.code = ?e.code,
                    report.summary_stored = progress.summary_stored(),
                    store.duration_ms = start.elapsed().as_millis() as u64,
                    "Failed to record workout completion: {}",
                    e
                );
                Err(e)
            }
        }
    }
}

/// Write progress of one session's completion, kept across finish retries
#[derive(Debug, Default)]
pub struct CompletionProgress {
    stored_summary: Option<CompletedWorkoutRecord>,
}

impl CompletionProgress {
    /// Whether the summary row has been written
    #[must_use]
    pub const fn summary_stored(&self) -> bool {
        self.stored_summary.is_some()
    }
}

/// Whole minutes between start and finish, rounded up. Clock skew that puts
/// `finished_at` before `started_at` counts as zero.
#[must_use]
pub fn duration_minutes(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> u32 {
    let seconds = (finished_at - started_at).num_seconds().max(0);
    let minutes = (seconds + MINUTE_SECONDS - 1) / MINUTE_SECONDS;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Reps as typed, or 0 when the text is empty, invalid, or negative
#[must_use]
pub fn parse_performed_reps(raw: &str) -> u32 {
    leading_integer(raw)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Weight as typed, or absent when the text is empty, invalid, or negative
#[must_use]
pub fn parse_performed_weight(raw: &str) -> Option<u32> {
    leading_integer(raw).and_then(|v| u32::try_from(v).ok())
}

/// Integer prefix of `raw` after leading whitespace: `"12kg"` is 12,
/// `"22.5"` is 22, `"abc"` and `""` have none.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
