// ABOUTME: Core types and constants for the Pierre workout session tracker
// ABOUTME: Foundation crate with error handling, workout domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Core
//!
//! Foundation crate providing shared types and constants for the workout
//! session tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `SessionError`
//! - **constants**: Backend table names, environment keys, and timer defaults
//! - **models**: Workout templates, prescriptions, and completion records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Workout domain models (templates, prescriptions, completion records)
pub mod models;
