//! Tick-driven timers.
//!
//! Timers never run callbacks on their own. The owner polls them with the current
//! instant from its tick, so a timer that has been dropped cannot fire.

use std::time::{Duration, Instant};

/// Fires exactly once, on the first poll at or after its deadline.
#[derive(Debug, Clone)]
pub(crate) struct OneShot {
    due: Instant,
    fired: bool,
}

impl OneShot {
    pub(crate) fn starting_at(now: Instant, delay: Duration) -> Self {
        Self {
            due: now + delay,
            fired: false,
        }
    }

    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.due {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Recurring timer with a fixed period.
///
/// `poll` reports how many whole periods elapsed since the last poll, so a late
/// tick catches up instead of drifting.
#[derive(Debug, Clone)]
pub(crate) struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    pub(crate) fn starting_at(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub(crate) fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due || self.period.is_zero() {
            return 0;
        }
        let behind = now.duration_since(self.next_due);
        let extra = (behind.as_nanos() / self.period.as_nanos()) as u32;
        let fired = extra.saturating_add(1);
        self.next_due += self.period * fired;
        fired
    }
}
