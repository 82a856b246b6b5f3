// ABOUTME: Main library entry point for the Pierre workout tracker
// ABOUTME: Active workout sessions with set logging, rest countdowns, and completion reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Tracker
//!
//! Runs a workout session against a prescribed template: the user records
//! reps and weight per set, marks sets complete, rests between sets on a
//! countdown, and finishes the session to persist a completion report.
//!
//! ## Architecture
//!
//! - **Session**: clock, set ledger, rest timer, and reporter behind one
//!   controller, hosted by an async runtime with tokio tick drivers
//! - **Store**: template reads and completion writes behind `WorkoutStore`
//! - **Progress**: dashboard totals and history detail over stored records
//! - **Config** and **Logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pierre_workout_tracker::config::SessionConfig;
//! use pierre_workout_tracker::session::SessionRuntime;
//! use pierre_workout_tracker::store::store_from_config;
//! use pierre_workout_core::errors::AppResult;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = SessionConfig::from_env()?;
//!     let store = store_from_config(&config)?;
//!     let mut session =
//!         SessionRuntime::start(store, Uuid::new_v4(), Uuid::new_v4(), &config).await?;
//!     let report = session.finish().await?;
//!     println!("Saved {} sets", report.completed_sets.len());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Dashboard totals and workout history detail
pub mod progress;

/// Active workout session
pub mod session;

/// Template and completion persistence
pub mod store;

pub use pierre_workout_core::{constants, errors, models};
