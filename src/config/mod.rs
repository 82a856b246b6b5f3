// ABOUTME: Configuration module for workout sessions and the backend store
// ABOUTME: Re-exports the environment-driven SessionConfig and its parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! - **Environment**: session timing and backend connection from environment variables

/// Environment and session configuration
pub mod environment;

pub use environment::{BackendConfig, Environment, SessionConfig};
