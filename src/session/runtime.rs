// ABOUTME: Async session host driving the clock and rest countdown with tokio interval tasks
// ABOUTME: Ticks are queued on one channel and applied by the owner, so state needs no locks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Runtime
//!
//! Each periodic driver is a spawned task pushing [`SessionEvent`]s into an
//! unbounded channel. The runtime owns the receiving end and the
//! [`SessionController`]; callers pull events with
//! [`SessionRuntime::next_event`], usually from a `tokio::select!` loop that
//! also reads user input. Drivers stop when the runtime finishes, abandons, or
//! is dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pierre_workout_core::errors::{AppResult, SessionError};
use pierre_workout_core::models::{CompletionReport, WorkoutTemplate};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use super::ledger::SetField;
use super::reporter::{CompletionProgress, CompletionReporter};
use super::rest_timer::RestTick;
use super::{CompleteOutcome, SessionController, SessionSnapshot};
use crate::config::SessionConfig;
use crate::logging::SessionLogger;
use crate::store::WorkoutStore;

/// A tick produced by one of the drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One period of the session clock elapsed
    ClockTick,
    /// One period of the rest countdown with this generation elapsed
    RestTick {
        /// Countdown the tick belongs to
        generation: u64,
    },
}

/// Observable effect of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Session clock advanced to this many seconds
    Elapsed(u64),
    /// Rest countdown has this many seconds left
    RestCounting(u32),
    /// Rest countdown reached zero
    RestFinished,
    /// Stale or post-close tick; nothing changed
    Ignored,
}

/// Decrements the live-driver count when a driver task ends or is aborted
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Handle to one periodic tick task
struct TickDriver {
    name: &'static str,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    fn spawn(
        name: &'static str,
        period: Duration,
        event: SessionEvent,
        events: mpsc::UnboundedSender<SessionEvent>,
        live: &Arc<AtomicUsize>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        live.fetch_add(1, Ordering::AcqRel);
        let guard = LiveGuard(Arc::clone(live));

        let handle = tokio::spawn(async move {
            let _guard = guard;
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(driver = name, "Tick driver stopped");
        });

        Self {
            name,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    fn signal(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Stop the task and wait until it has exited. Returns false if the
    /// task panicked or was cancelled instead of stopping on its own.
    async fn shutdown(mut self) -> bool {
        self.signal();
        let Some(handle) = self.handle.take() else {
            return true;
        };
        match handle.await {
            Ok(()) => true,
            Err(e) => {
                warn!(driver = self.name, "Tick driver task failed: {e}");
                false
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.signal();
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Counts driver tasks that are still alive
#[derive(Debug, Clone)]
pub struct DriverWatch {
    live: Arc<AtomicUsize>,
}

impl DriverWatch {
    /// Driver tasks not yet exited
    #[must_use]
    pub fn active(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

/// Async host for one workout session
pub struct SessionRuntime<S: WorkoutStore + ?Sized> {
    store: Arc<S>,
    controller: SessionController,
    tick_interval: Duration,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    clock_driver: Option<TickDriver>,
    rest_driver: Option<TickDriver>,
    live_drivers: Arc<AtomicUsize>,
    completion: CompletionProgress,
}

impl<S: WorkoutStore + ?Sized> SessionRuntime<S> {
    /// Fetch the workout template and start a session for `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded
    pub async fn start(
        store: Arc<S>,
        workout_id: Uuid,
        user_id: Uuid,
        config: &SessionConfig,
    ) -> AppResult<Self> {
        let template = store.fetch_template(workout_id).await?;
        Ok(Self::with_template(store, &template, user_id, config))
    }

    /// Start a session from an already loaded template. Must be called
    /// inside a tokio runtime.
    #[must_use]
    pub fn with_template(
        store: Arc<S>,
        template: &WorkoutTemplate,
        user_id: Uuid,
        config: &SessionConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let live_drivers = Arc::new(AtomicUsize::new(0));
        let controller = SessionController::start(template, user_id, Utc::now());
        let clock_driver = TickDriver::spawn(
            "clock",
            config.tick_interval,
            SessionEvent::ClockTick,
            events_tx.clone(),
            &live_drivers,
        );
        SessionLogger::log_session_event(template.id, "started", 0);

        Self {
            store,
            controller,
            tick_interval: config.tick_interval,
            events_tx,
            events_rx,
            clock_driver: Some(clock_driver),
            rest_driver: None,
            live_drivers,
            completion: CompletionProgress::default(),
        }
    }

    /// Wait for the next tick and apply it. Cancel safe, so it can be one
    /// branch of a `tokio::select!`.
    pub async fn next_event(&mut self) -> SessionUpdate {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => SessionUpdate::Ignored,
        }
    }

    fn apply(&mut self, event: SessionEvent) -> SessionUpdate {
        if self.controller.is_closed() {
            return SessionUpdate::Ignored;
        }
        match event {
            SessionEvent::ClockTick => SessionUpdate::Elapsed(self.controller.tick_clock()),
            SessionEvent::RestTick { generation } => match self.controller.tick_rest(generation) {
                RestTick::Counting(remaining) => SessionUpdate::RestCounting(remaining),
                RestTick::Finished => {
                    self.rest_driver = None;
                    debug!(session.workout_id = %self.controller.workout_id(), "Rest finished");
                    SessionUpdate::RestFinished
                }
                RestTick::Ignored => SessionUpdate::Ignored,
            },
        }
    }

    /// Edit a set's reps or weight text
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or the set does not exist
    pub fn update_entry(
        &mut self,
        exercise_id: Uuid,
        set_number: u32,
        field: SetField,
        value: impl Into<String>,
    ) -> AppResult<bool> {
        self.controller
            .update_entry(exercise_id, set_number, field, value)
    }

    /// Complete a set and start its rest countdown driver
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or the set does not exist
    pub fn complete_set(&mut self, exercise_id: Uuid, set_number: u32) -> AppResult<CompleteOutcome> {
        let outcome = self.controller.complete_set(exercise_id, set_number)?;
        if let Some(generation) = outcome.rest_generation {
            self.rest_driver = Some(TickDriver::spawn(
                "rest",
                self.tick_interval,
                SessionEvent::RestTick { generation },
                self.events_tx.clone(),
                &self.live_drivers,
            ));
        }
        Ok(outcome)
    }

    /// Cancel the running rest countdown
    pub fn skip_rest(&mut self) -> bool {
        self.rest_driver = None;
        self.controller.skip_rest()
    }

    /// Whether every set is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.controller.all_completed()
    }

    /// Display snapshot
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.controller.snapshot()
    }

    /// Underlying controller
    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Live driver counter, usable after the runtime is consumed
    #[must_use]
    pub fn watch_drivers(&self) -> DriverWatch {
        DriverWatch {
            live: Arc::clone(&self.live_drivers),
        }
    }

    /// Persist the session as finished now
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or persistence fails; on a
    /// persistence failure the session stays open and timers keep running
    pub async fn finish(&mut self) -> AppResult<CompletionReport> {
        self.finish_at(Utc::now()).await
    }

    /// Persist the session as finished at `finished_at`
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed or persistence fails. A
    /// retry after the summary was stored keeps that summary and its
    /// `finished_at`, and writes only the set rows.
    pub async fn finish_at(&mut self, finished_at: DateTime<Utc>) -> AppResult<CompletionReport> {
        if self.controller.is_closed() {
            return Err(SessionError::SessionClosed.into());
        }
        let report = CompletionReporter::persist(
            self.store.as_ref(),
            self.controller.build_report(finished_at),
            &mut self.completion,
        )
        .await?;

        self.shutdown_drivers().await;
        self.controller.close();
        SessionLogger::log_session_event(
            self.controller.workout_id(),
            "finished",
            self.controller.clock().elapsed_seconds(),
        );
        Ok(report)
    }

    /// Stop all drivers and discard the session without persisting
    pub async fn abandon(mut self) {
        self.shutdown_drivers().await;
        self.controller.close();
        SessionLogger::log_session_event(
            self.controller.workout_id(),
            "abandoned",
            self.controller.clock().elapsed_seconds(),
        );
    }

    async fn shutdown_drivers(&mut self) {
        if let Some(driver) = self.clock_driver.take() {
            driver.shutdown().await;
        }
        if let Some(driver) = self.rest_driver.take() {
            driver.shutdown().await;
        }
    }
}

impl<S: WorkoutStore + ?Sized> Drop for SessionRuntime<S> {
    fn drop(&mut self) {
        if !self.controller.is_closed() {
            debug!(
                session.workout_id = %self.controller.workout_id(),
                "Session dropped while open, stopping tick drivers"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_clock(
        live: &Arc<AtomicUsize>,
    ) -> (TickDriver, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = TickDriver::spawn(
            "clock",
            Duration::from_secs(1),
            SessionEvent::ClockTick,
            tx,
            live,
        );
        (driver, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_a_running_driver() {
        let live = Arc::new(AtomicUsize::new(0));
        let (driver, mut rx) = spawn_clock(&live);
        assert_eq!(rx.recv().await, Some(SessionEvent::ClockTick));

        assert!(driver.shutdown().await);
        assert_eq!(live.load(Ordering::Acquire), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_reports_a_cancelled_driver() {
        let live = Arc::new(AtomicUsize::new(0));
        let (driver, _rx) = spawn_clock(&live);
        if let Some(handle) = &driver.handle {
            handle.abort();
        }

        assert!(!driver.shutdown().await);
        assert_eq!(live.load(Ordering::Acquire), 0);
    }
}
