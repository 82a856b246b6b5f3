// ABOUTME: Single-shot rest countdown shown as an overlay after each completed set
// ABOUTME: Starting a countdown always cancels the previous one; zero-length rests never show
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rest Timer
//!
//! `Idle → Running(exercise, remaining) → Idle`. The timer is a pure state
//! machine; the periodic driver that calls [`RestTimer::tick`] lives in the
//! session runtime. Each countdown gets a generation number so that a tick
//! queued by a cancelled driver can be recognised and dropped.

use serde::Serialize;
use uuid::Uuid;

use super::clock::format_elapsed;

/// Observable rest-timer state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RestTimerState {
    /// No countdown
    Idle,
    /// Counting down for one exercise
    Running {
        /// Workout-exercise the rest belongs to
        exercise_id: Uuid,
        /// Exercise display name for the overlay
        exercise_name: String,
        /// Seconds left
        remaining: u32,
    },
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestTick {
    /// Timer was idle; nothing happened
    Ignored,
    /// Countdown continues with this many seconds left
    Counting(u32),
    /// Countdown reached zero and the timer is idle again
    Finished,
}

/// What the host displays while a countdown runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestOverlay {
    /// Exercise the rest belongs to
    pub exercise_name: String,
    /// Seconds left
    pub remaining: u32,
    /// Seconds left as `MM:SS`
    pub formatted: String,
}

/// Rest countdown with cancel-on-restart semantics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTimer {
    state: RestTimerState,
    generation: u64,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    /// Idle timer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RestTimerState::Idle,
            generation: 0,
        }
    }

    /// Start a countdown, cancelling whatever was running.
    ///
    /// Returns the generation of the new countdown, or `None` when
    /// `duration_secs` is zero and the timer went straight back to idle.
    pub fn start(
        &mut self,
        exercise_id: Uuid,
        exercise_name: impl Into<String>,
        duration_secs: u32,
    ) -> Option<u64> {
        self.generation += 1;
        if duration_secs == 0 {
            self.state = RestTimerState::Idle;
            return None;
        }
        self.state = RestTimerState::Running {
            exercise_id,
            exercise_name: exercise_name.into(),
            remaining: duration_secs,
        };
        Some(self.generation)
    }

    /// Count down one second
    pub fn tick(&mut self) -> RestTick {
        let remaining = match &mut self.state {
            RestTimerState::Running { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                *remaining
            }
            RestTimerState::Idle => return RestTick::Ignored,
        };
        if remaining == 0 {
            self.state = RestTimerState::Idle;
            self.generation += 1;
            RestTick::Finished
        } else {
            RestTick::Counting(remaining)
        }
    }

    /// Tick only if `generation` is the current countdown
    pub fn tick_generation(&mut self, generation: u64) -> RestTick {
        if generation == self.generation {
            self.tick()
        } else {
            RestTick::Ignored
        }
    }

    /// Cancel the running countdown. Returns `false` when already idle.
    pub fn skip(&mut self) -> bool {
        if self.is_running() {
            self.state = RestTimerState::Idle;
            self.generation += 1;
            true
        } else {
            false
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &RestTimerState {
        &self.state
    }

    /// Whether a countdown is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, RestTimerState::Running { .. })
    }

    /// Generation of the current (or most recently ended) countdown
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Seconds left, if running
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        match &self.state {
            RestTimerState::Running { remaining, .. } => Some(*remaining),
            RestTimerState::Idle => None,
        }
    }

    /// Overlay contents while running
    #[must_use]
    pub fn overlay(&self) -> Option<RestOverlay> {
        match &self.state {
            RestTimerState::Running {
                exercise_name,
                remaining,
                ..
            } => Some(RestOverlay {
                exercise_name: exercise_name.clone(),
                remaining: *remaining,
                formatted: format_elapsed(u64::from(*remaining)),
            }),
            RestTimerState::Idle => None,
        }
    }
}
