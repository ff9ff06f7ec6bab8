//! Periodic tick registration
//!
//! The host event loop owns time. It asks [`TickScheduler::is_due`] whenever it
//! wakes, runs a tick, then calls [`TickScheduler::rearm`]. The next tick is
//! always one interval after the previous one *finished*: there is no catch-up,
//! so a slow machine simply animates slower. That drift is accepted for a desktop
//! toy; overruns are logged at debug level so it is never silent.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Armed { due: Instant },
}

/// Registration of the animation tick
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    state: State,
    /// Ticks that took longer than the interval
    overruns: u64,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: State::Idle,
            overruns: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Register the periodic tick; the first one is due immediately.
    /// Returns false if it was already registered.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        log::info!("Animation started ({:?} interval)", self.interval);
        self.state = State::Armed { due: now };
        true
    }

    /// Cancel the periodic tick
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("Animation stopped - no active pets");
        }
        self.state = State::Idle;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.state {
            State::Armed { due } => now >= due,
            State::Idle => false,
        }
    }

    /// How long the host may sleep before the next tick (`None` when idle)
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            State::Armed { due } => Some(due.saturating_duration_since(now)),
            State::Idle => None,
        }
    }

    /// Arm the next tick one interval after `finished`. No-op when stopped.
    pub fn rearm(&mut self, started: Instant, finished: Instant) {
        if !self.is_running() {
            return;
        }
        let took = finished.saturating_duration_since(started);
        if took > self.interval {
            self.overruns += 1;
            log::debug!(
                "Tick took {:?} (interval {:?}); animation is running slow",
                took,
                self.interval
            );
        }
        self.state = State::Armed {
            due: finished + self.interval,
        };
    }
}
