//! Countdown timer for the active alert.
//!
//! The timer never sleeps or spawns anything. Arming it yields a
//! [`TickRequest`] the host schedules; every accepted tick yields the next
//! request until the countdown runs out. Each arm or cancel bumps a
//! generation counter so ticks issued for an earlier countdown are rejected.

use std::time::Duration;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Tick delivered back to the alert model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub generation: u64,
}

/// Ask the host to deliver a [`TickEvent`] after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRequest {
    pub generation: u64,
    pub delay: Duration,
}

impl TickRequest {
    pub fn event(&self) -> TickEvent {
        TickEvent {
            generation: self.generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown still running; schedule `next`.
    Continue { remaining: u32, next: TickRequest },
    /// Countdown reached zero; the timer is stopped.
    Expired,
    /// Tick belongs to a cancelled or replaced countdown.
    Stale,
}

#[derive(Debug, Clone)]
pub struct AlertTimer {
    interval: Duration,
    generation: u64,
    remaining: u32,
    armed: bool,
}

impl Default for AlertTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl AlertTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            remaining: 0,
            armed: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cadence used by the next [`arm`](Self::arm); a running countdown keeps its requests.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Start a countdown of `duration_ticks` (at least one), replacing any
    /// running one, and return the first tick request.
    pub fn arm(&mut self, duration_ticks: u32) -> TickRequest {
        self.generation = self.generation.wrapping_add(1);
        self.remaining = duration_ticks.max(1);
        self.armed = true;
        self.request()
    }

    /// Stop the countdown. Calling it on a stopped timer does nothing.
    pub fn cancel(&mut self) {
        if !self.armed {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.remaining = 0;
        self.armed = false;
    }

    pub fn on_tick(&mut self, tick: TickEvent) -> TickOutcome {
        if !self.armed || tick.generation != self.generation {
            return TickOutcome::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            self.generation = self.generation.wrapping_add(1);
            return TickOutcome::Expired;
        }

        TickOutcome::Continue {
            remaining: self.remaining,
            next: self.request(),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn request(&self) -> TickRequest {
        TickRequest {
            generation: self.generation,
            delay: self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut timer = AlertTimer::new(Duration::from_millis(100));
        let mut request = timer.arm(3);
        assert_eq!(request.delay, Duration::from_millis(100));

        for expected in [2, 1] {
            match timer.on_tick(request.event()) {
                TickOutcome::Continue { remaining, next } => {
                    assert_eq!(remaining, expected);
                    request = next;
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }

        assert_eq!(timer.on_tick(request.event()), TickOutcome::Expired);
        assert!(!timer.is_armed());
        assert_eq!(timer.on_tick(request.event()), TickOutcome::Stale);
    }

    #[test]
    fn rearm_invalidates_old_ticks() {
        let mut timer = AlertTimer::default();
        let old = timer.arm(5);
        let fresh = timer.arm(5);
        assert_eq!(timer.on_tick(old.event()), TickOutcome::Stale);
        assert_eq!(timer.remaining(), 5);
        assert!(matches!(
            timer.on_tick(fresh.event()),
            TickOutcome::Continue { remaining: 4, .. }
        ));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timer = AlertTimer::default();
        let request = timer.arm(2);
        timer.cancel();
        let generation = timer.generation();
        timer.cancel();
        assert_eq!(timer.generation(), generation);
        assert_eq!(timer.on_tick(request.event()), TickOutcome::Stale);
    }

    #[test]
    fn zero_duration_still_shows_for_one_tick() {
        let mut timer = AlertTimer::default();
        let request = timer.arm(0);
        assert_eq!(timer.remaining(), 1);
        assert_eq!(timer.on_tick(request.event()), TickOutcome::Expired);
    }
}
