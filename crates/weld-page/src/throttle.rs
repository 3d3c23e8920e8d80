//! Leading-edge rate limiter.

use std::time::Duration;

/// Fires on the first call of an idle period, then refuses every call until
/// `interval` has elapsed since the last fire. Refused calls are dropped,
/// not deferred.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fire: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and records `now` if a call is allowed at `now`.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        match self.last_fire {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }

    /// Record a fire that bypassed the limiter.
    pub fn force(&mut self, now: Duration) {
        self.last_fire = Some(now);
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
