// ABOUTME: Free-running session clock counting elapsed seconds for an open workout
// ABOUTME: Ticks never pause; stop is idempotent and must run on every exit path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::mem;

use chrono::{DateTime, Utc};

/// Elapsed-time counter for one session.
///
/// The counter is driven externally: something calls [`SessionClock::tick`]
/// once per second (see `SessionRuntime`). Rest-timer state and navigation
/// have no influence on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    started_at: DateTime<Utc>,
    elapsed_seconds: u64,
    running: bool,
}

impl SessionClock {
    /// Start a clock at `now`
    #[must_use]
    pub const fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            elapsed_seconds: 0,
            running: true,
        }
    }

    /// Advance by exactly one second while running
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    /// Halt the clock. Returns `false` when it was already stopped.
    pub fn stop(&mut self) -> bool {
        mem::replace(&mut self.running, false)
    }

    /// Instant the session started
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds counted so far
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether ticks are still being counted
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time as `MM:SS`
    #[must_use]
    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped at 60.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
