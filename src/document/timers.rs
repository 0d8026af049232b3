//! Interval Timers - Recurring timers on a virtual clock.
//!
//! The host advances the clock; timers report when they are due. A timer
//! that falls behind fires once and skips the ticks it missed, so a slow
//! host never sees a burst of queued firings.

use std::time::Duration;

use crate::types::TimerId;

struct Interval {
    id: TimerId,
    period: Duration,
    /// Time accumulated since the last firing.
    elapsed: Duration,
}

/// Set of recurring timers.
#[derive(Default)]
pub struct IntervalTimers {
    intervals: Vec<Interval>,
    next_id: u64,
}

impl IntervalTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a recurring timer.
    ///
    /// A zero period is bumped to one millisecond (0 would fire forever).
    pub fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.push(Interval {
            id,
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        });
        id
    }

    /// Cancel a timer. Unknown ids are ignored.
    pub fn clear_interval(&mut self, id: TimerId) {
        self.intervals.retain(|interval| interval.id != id);
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.intervals.iter().any(|interval| interval.id == id)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Move the clock forward and return the timers that fired, in creation
    /// order. Each timer fires at most once per call.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for interval in &mut self.intervals {
            interval.elapsed += delta;
            if interval.elapsed >= interval.period {
                // Drop the missed ticks, keep the phase within one period
                let nanos = interval.elapsed.as_nanos() % interval.period.as_nanos();
                interval.elapsed = Duration::from_nanos(nanos as u64);
                fired.push(interval.id);
            }
        }
        fired
    }

    /// Time until the earliest timer is due, `None` if nothing is scheduled.
    pub fn next_due(&self) -> Option<Duration> {
        self.intervals
            .iter()
            .map(|interval| interval.period.saturating_sub(interval.elapsed))
            .min()
    }
}

// =============================================================================
// Tests
// =============================================================================
