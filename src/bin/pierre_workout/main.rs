// ABOUTME: pierre-workout - terminal host for running and reviewing workout sessions
// ABOUTME: Starts an interactive session or prints progress from the configured store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Run a workout stored in the hosted backend
//! PIERRE_WORKOUT_BACKEND_URL=https://xyz.supabase.co PIERRE_WORKOUT_BACKEND_KEY=... \
//!   pierre-workout start --workout <uuid> --user <uuid>
//!
//! # Run a workout from a local template file (in-memory store, nothing persisted)
//! pierre-workout start --template push-day.json --user <uuid>
//!
//! # Dashboard totals
//! pierre-workout summary --user <uuid>
//!
//! # Set history of a finished workout
//! pierre-workout history --workout <uuid>
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pierre_workout_tracker::{
    config::SessionConfig,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    store::{load_template_file, store_from_config, InMemoryWorkoutStore, WorkoutStore},
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "pierre-workout",
    about = "Pierre workout session tracker",
    long_about = "Run a workout session with set logging and rest timers, and review progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Start an interactive workout session
    Start {
        /// Workout to perform (defaults to the template file's id)
        #[arg(long)]
        workout: Option<Uuid>,

        /// User performing the workout
        #[arg(long)]
        user: Uuid,

        /// Load the workout from a JSON template file instead of the backend
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Show workout totals for a user
    Summary {
        /// User to summarize
        #[arg(long)]
        user: Uuid,
    },

    /// Show the completed sets of one workout
    History {
        /// Workout id
        #[arg(long)]
        workout: Uuid,

        /// JSON template file used to name exercises
        #[arg(long)]
        template: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(request_id) = &e.request_id {
                eprintln!("Request id: {request_id}");
            }
            ExitCode::from(e.code.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging
        .init()
        .map_err(|e| AppError::internal(e.to_string()))?;

    let config = SessionConfig::from_env()?;
    info!("Configuration: {}", config.summary());

    match cli.command {
        Command::Start {
            workout,
            user,
            template,
        } => {
            let (store, workout_id) = match template {
                Some(path) => {
                    let template = load_template_file(&path).await?;
                    let id = workout.unwrap_or(template.id);
                    let store: Arc<dyn WorkoutStore> =
                        Arc::new(InMemoryWorkoutStore::with_templates([template]));
                    (store, id)
                }
                None => {
                    let id = workout.ok_or_else(|| {
                        AppError::invalid_input("--workout is required without --template")
                    })?;
                    (store_from_config(&config)?, id)
                }
            };
            commands::session::run(store, workout_id, user, &config).await?;
        }
        Command::Summary { user } => {
            let store = store_from_config(&config)?;
            commands::progress::summary(store.as_ref(), user).await?;
        }
        Command::History { workout, template } => {
            let store = store_from_config(&config)?;
            let template = match template {
                Some(path) => Some(load_template_file(&path).await?),
                None => None,
            };
            commands::progress::history(store.as_ref(), workout, template).await?;
        }
    }

    Ok(())
}
