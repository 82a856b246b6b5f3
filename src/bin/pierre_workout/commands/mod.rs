// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-workout
// ABOUTME: Provides the interactive session command and the progress views

pub mod progress;
pub mod session;
