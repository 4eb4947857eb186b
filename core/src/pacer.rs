use std::time::{Duration, Instant};

use crate::constants::TIMER_HZ;

/// How far a pacer may fall behind before it stops trying to catch up.
const MAX_LAG: Duration = Duration::from_millis(250);

/// # Pacer
/// A fixed-rate cadence driven by a clock the host samples once per loop.
///
/// The host runs the CPU and the timers off separate pacers so that instruction rate and
/// timer rate are independent of each other.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    next: Instant,
}

impl Pacer {
    /// A pacer that fires `hz` times per second, first at `now`.
    pub fn new(hz: u32, now: Instant) -> Self {
        Pacer {
            interval: Duration::from_secs(1) / hz.max(1),
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When this pacer next fires.
    pub fn next_due(&self) -> Instant {
        self.next
    }

    /// Whether the pacer fires at `now`; if it does, schedules the next slot.
    ///
    /// Missed slots are made up one per call, unless the pacer is more than `MAX_LAG`
    /// behind, in which case it starts afresh from `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if now.saturating_duration_since(self.next) > MAX_LAG {
            self.next = now;
        }
        true
    }

    pub fn reset(&mut self, now: Instant) {
        self.next = now;
    }
}

/// Which cadences fired on one pass of the host loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Due {
    pub cpu: bool,
    pub timers: bool,
}

impl Due {
    pub fn any(&self) -> bool {
        self.cpu || self.timers
    }
}

/// # Schedule
/// The instruction pacer and the 60 Hz timer pacer, polled together from one sampled clock.
///
/// Each is checked on every poll, so the timers keep their rate whatever the instruction rate is.
#[derive(Debug, Clone)]
pub struct Schedule {
    cpu: Pacer,
    timers: Pacer,
}

impl Schedule {
    pub fn new(instructions_per_second: u32, now: Instant) -> Self {
        Schedule {
            cpu: Pacer::new(instructions_per_second, now),
            timers: Pacer::new(TIMER_HZ, now),
        }
    }

    pub fn poll(&mut self, now: Instant) -> Due {
        Due {
            timers: self.timers.due(now),
            cpu: self.cpu.due(now),
        }
    }

    /// The earliest instant at which either cadence fires.
    pub fn next_due(&self) -> Instant {
        self.cpu.next_due().min(self.timers.next_due())
    }

    pub fn reset(&mut self, now: Instant) {
        self.cpu.reset(now);
        self.timers.reset(now);
    }
}
