//! Time sources for the simulation
//!
//! The engine never reads the OS clock; callers pass `now` into every step.
//! These clocks are what callers read `now` from.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time since the clock's origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time, with pause support so that paused games do not age portals
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += at.elapsed();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        let reference = self.paused_at.unwrap_or_else(Instant::now);
        reference
            .saturating_duration_since(self.origin)
            .saturating_sub(self.paused_total)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
