//! Minimum-interval pacing between navigations.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Enforces a minimum interval between consecutive navigations.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Time still to wait before the next navigation may start.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => (last + self.min_interval)
                .checked_duration_since(now)
                .unwrap_or(Duration::from_secs(0)),
            None => Duration::from_secs(0),
        }
    }

    /// Block until the interval since the previous navigation has elapsed,
    /// then mark a new navigation as started.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            debug!(wait = ?remaining, "throttling navigation");
            thread::sleep(remaining);
        }
        self.last = Some(Instant::now());
    }
}
