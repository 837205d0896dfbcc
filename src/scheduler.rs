//! Fixed-period tick pacing.
//!
//! ```text
//!  ┌──────── period (10 ms) ────────┐
//!  │ tick body        │ sleep rest  │ tick body ...
//!  └──────────────────┴─────────────┘
//! ```
//!
//! The body runs to completion, then the scheduler sleeps for whatever is
//! left of the period.  A body that overruns (for example a console
//! command waiting on operator input) is counted, and the next tick
//! starts immediately.  Missed ticks are not replayed.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::MonotonicPort;

/// `DelayNs` backed by `std::thread::sleep` (FreeRTOS delay on ESP-IDF).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

pub struct TickScheduler<D, M> {
    delay: D,
    clock: M,
    period_ms: u32,
    tick_count: u64,
    overruns: u32,
}

impl<D: DelayNs, M: MonotonicPort> TickScheduler<D, M> {
    pub fn new(delay: D, clock: M, period_ms: u32) -> Self {
        Self {
            delay,
            clock,
            period_ms,
            tick_count: 0,
            overruns: 0,
        }
    }

    /// Run one tick body, then sleep out the rest of the period.
    pub fn pace<R>(&mut self, body: impl FnOnce() -> R) -> R {
        let start = self.clock.uptime_ms();
        let out = body();
        let elapsed = self.clock.uptime_ms().saturating_sub(start);
        self.tick_count += 1;

        let period = u64::from(self.period_ms);
        if elapsed > period {
            self.overruns = self.overruns.saturating_add(1);
            debug!(
                "scheduler: tick {} overran by {} ms ({} total)",
                self.tick_count,
                elapsed - period,
                self.overruns
            );
        } else if elapsed < period {
            // elapsed < period <= u32::MAX
            self.delay.delay_ms((period - elapsed) as u32);
        }
        out
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
