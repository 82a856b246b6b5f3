// ABOUTME: PostgREST-style workout store for the hosted backend
// ABOUTME: Reads templates with embedded exercises and inserts completion rows over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # REST Workout Store
//!
//! Talks to the hosted backend's row API at `<url>/rest/v1/<table>` with the
//! `apikey` header and a bearer token. Filters use `PostgREST` syntax
//! (`id=eq.<uuid>`) and exercise details are loaded through an embedded
//! `exercises(...)` select so one request returns the whole prescription list.

use std::slice;
use std::time::Instant;

use async_trait::async_trait;
use pierre_workout_core::constants::{backend, service_names, tables};
use pierre_workout_core::errors::{AppError, AppResult};
use pierre_workout_core::models::{
    CompletedSetRecord, CompletedWorkoutRecord, ExercisePrescription, ExerciseRef, WorkoutTemplate,
};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use super::WorkoutStore;
use crate::config::BackendConfig;
use crate::logging::SessionLogger;

/// `workouts` row
#[derive(Debug, Deserialize)]
struct WorkoutRow {
    id: Uuid,
    name: String,
}

/// Embedded `exercises` row
#[derive(Debug, Deserialize)]
struct ExerciseRow {
    id: Uuid,
    name: String,
    #[serde(default)]
    primary_muscle: Option<String>,
    #[serde(default)]
    equipment: Option<String>,
}

/// `workout_exercises` row with its exercise embedded
#[derive(Debug, Deserialize)]
struct WorkoutExerciseRow {
    id: Uuid,
    #[serde(default)]
    sets: Option<u32>,
    #[serde(default)]
    reps: Option<u32>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    rest_interval: Option<u32>,
    #[serde(default)]
    order_index: Option<u32>,
    exercises: ExerciseRow,
}

impl WorkoutExerciseRow {
    fn into_prescription(self) -> ExercisePrescription {
        let Self {
            id,
            sets,
            reps,
            weight,
            rest_interval,
            order_index,
            exercises,
        } = self;
        ExercisePrescription {
            workout_exercise_id: id,
            exercise: ExerciseRef {
                id: exercises.id,
                name: exercises.name,
                primary_muscle: exercises.primary_muscle,
                equipment: exercises.equipment,
            },
            sets: sets.unwrap_or(0),
            reps: reps.unwrap_or(0),
            weight,
            rest_interval_secs: rest_interval.unwrap_or(0),
            order_index: order_index.unwrap_or(0),
        }
    }
}

/// Workout store backed by the hosted backend's REST API
#[derive(Debug, Clone)]
pub struct RestWorkoutStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestWorkoutStore {
    /// Build a store with its own pooled client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Build a store around an existing client
    #[must_use]
    pub fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}{}/{table}", self.base_url, backend::REST_PATH)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(backend::API_KEY_HEADER, &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let start = Instant::now();
        let result = async {
            let response = self
                .authorized(self.client.get(self.table_url(table)))
                .query(query)
                .send()
                .await
                .map_err(transport_error)?;
            let response = ensure_success(response, table).await?;
            response.json::<Vec<T>>().await.map_err(|e| {
                AppError::serialization(format!("Invalid {table} rows: {e}")).with_source(e)
            })
        }
        .await;
        SessionLogger::log_store_operation("select", table, result.is_ok(), elapsed_ms(start));
        result
    }

    async fn insert<T: Serialize + Sync>(&self, table: &str, rows: &[T]) -> AppResult<()> {
        if rows.is_empty() {
            debug!(store.table = table, "Nothing to insert");
            return Ok(());
        }
        let start = Instant::now();
        let result = async {
            let response = self
                .authorized(self.client.post(self.table_url(table)))
                .header(backend::PREFER_HEADER, backend::PREFER_RETURN_MINIMAL)
                .json(rows)
                .send()
                .await
                .map_err(transport_error)?;
            ensure_success(response, table).await.map(drop)
        }
        .await;
        SessionLogger::log_store_operation("insert", table, result.is_ok(), elapsed_ms(start));
        result
    }
}

#[async_trait]
impl WorkoutStore for RestWorkoutStore {
    async fn fetch_template(&self, workout_id: Uuid) -> AppResult<WorkoutTemplate> {
        let id_filter = format!("eq.{workout_id}");
        let workout = self
            .select::<WorkoutRow>(
                tables::WORKOUTS,
                &[("id", id_filter.clone()), ("select", "id,name".to_owned())],
            )
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::not_found(format!("Workout {workout_id}"))
                    .with_resource_id(workout_id.to_string())
            })?;

        let rows = self
            .select::<WorkoutExerciseRow>(
                tables::WORKOUT_EXERCISES,
                &[
                    ("workout_id", id_filter),
                    ("select", backend::WORKOUT_EXERCISE_SELECT.to_owned()),
                    ("order", "order_index.asc".to_owned()),
                ],
            )
            .await?;

        let mut template = WorkoutTemplate {
            id: workout.id,
            name: workout.name,
            exercises: rows
                .into_iter()
                .map(WorkoutExerciseRow::into_prescription)
                .collect(),
        };
        template.sort_by_order();
        Ok(template)
    }

    async fn record_summary(&self, summary: &CompletedWorkoutRecord) -> AppResult<()> {
        self.insert(tables::COMPLETED_WORKOUTS, slice::from_ref(summary))
            .await
    }

    async fn record_sets(&self, sets: &[CompletedSetRecord]) -> AppResult<()> {
        self.insert(tables::COMPLETED_SETS, sets).await
    }

    async fn list_completed_workouts(&self, user_id: Uuid) -> AppResult<Vec<CompletedWorkoutRecord>> {
        self.select(
            tables::COMPLETED_WORKOUTS,
            &[
                ("user_id", format!("eq.{user_id}")),
                (
                    "select",
                    "workout_id,user_id,date_completed,duration".to_owned(),
                ),
                ("order", "date_completed.desc".to_owned()),
            ],
        )
        .await
    }

    async fn list_completed_sets(&self, workout_id: Uuid) -> AppResult<Vec<CompletedSetRecord>> {
        self.select(
            tables::COMPLETED_SETS,
            &[
                ("workout_id", format!("eq.{workout_id}")),
                (
                    "select",
                    "workout_id,workout_exercise_id,performed_set_order,performed_reps,performed_weight"
                        .to_owned(),
                ),
                ("order", "performed_set_order.asc".to_owned()),
            ],
        )
        .await
    }
}

/// Map a non-2xx response to an external service error carrying status,
/// body, and the gateway request id
async fn ensure_success(response: Response, table: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let request_id = response
        .headers()
        .get(backend::REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await.unwrap_or_default();
    error!("Backend request on {table} failed - status: {status}, body: {body}");

    let message = format!("{table} request failed with status {status}: {body}");
    let mut err = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        AppError::external_auth(service_names::WORKOUT_BACKEND, message)
    } else {
        AppError::external_service(service_names::WORKOUT_BACKEND, message)
    };
    if let Some(id) = request_id {
        err = err.with_request_id(id);
    }
    Err(err)
}

fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() || e.is_connect() {
        AppError::external_unavailable(service_names::WORKOUT_BACKEND, e.to_string()).with_source(e)
    } else {
        AppError::external_service(service_names::WORKOUT_BACKEND, e.to_string()).with_source(e)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_owned(),
            api_key: "anon-key".to_owned(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn table_urls_use_row_api_path() {
        let store = RestWorkoutStore::new(&config("https://demo.example.co/")).unwrap();
        assert_eq!(
            store.table_url(tables::COMPLETED_SETS),
            "https://demo.example.co/rest/v1/completed_sets"
        );
    }

    #[test]
    fn exercise_rows_map_to_prescriptions() {
        let row: WorkoutExerciseRow = serde_json::from_value(serde_json::json!({
            "id": "4f6f0d36-3c3e-4a55-9a52-8b0f1f0a9d11",
            "sets": 3,
            "reps": 10,
            "weight": null,
            "rest_interval": 60,
            "order_index": 2,
            "exercises": {
                "id": "a3a1f9a2-5a4e-4b3b-9f0e-0c1d2e3f4a5b",
                "name": "Push-up",
                "primary_muscle": "Chest",
                "equipment": null
            }
        }))
        .unwrap();

        let prescription = row.into_prescription();
        assert_eq!(prescription.sets, 3);
        assert_eq!(prescription.rest_interval_secs, 60);
        assert_eq!(prescription.weight, None);
        assert_eq!(prescription.exercise.name, "Push-up");
        assert_eq!(prescription.exercise.primary_muscle.as_deref(), Some("Chest"));
    }

    #[test]
    fn missing_rest_interval_means_no_rest() {
        let row: WorkoutExerciseRow = serde_json::from_value(serde_json::json!({
            "id": "4f6f0d36-3c3e-4a55-9a52-8b0f1f0a9d11",
            "sets": 2,
            "reps": 5,
            "weight": 82.5,
            "exercises": { "id": "a3a1f9a2-5a4e-4b3b-9f0e-0c1d2e3f4a5b", "name": "Squat" }
        }))
        .unwrap();

        let prescription = row.into_prescription();
        assert_eq!(prescription.rest_interval_secs, 0);
        assert_eq!(prescription.weight, Some(82.5));
    }
}
