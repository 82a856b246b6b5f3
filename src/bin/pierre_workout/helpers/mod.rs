// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for pierre-workout
// ABOUTME: Provides access to input parsing and display formatting utilities

pub mod display;
pub mod input;
