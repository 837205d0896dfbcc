//! ESP32 time adapters.
//!
//! - [`WallClock`] — settable wall clock (epoch seconds) behind
//!   [`ClockPort`].  Starts at the epoch after reset until the operator
//!   sets it from the console.
//! - [`Uptime`] — monotonic milliseconds since boot behind
//!   [`MonotonicPort`], used to pace the main loop.
//!
//! **`target_os = "espidf"`** uses `gettimeofday`/`settimeofday` and
//! `esp_timer_get_time()`.  Elsewhere, `std::time` stands in for
//! host-side testing and simulation.

use crate::app::ports::{ClockPort, MonotonicPort};

// ── Wall clock ────────────────────────────────────────────────

pub struct WallClock {
    /// Host only: epoch seconds at `set_at`.
    #[cfg(not(target_os = "espidf"))]
    base: i64,
    #[cfg(not(target_os = "espidf"))]
    set_at: std::time::Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            base: 0,
            #[cfg(not(target_os = "espidf"))]
            set_at: std::time::Instant::now(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl ClockPort for WallClock {
    fn now(&self) -> i64 {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: `tv` outlives the call; null timezone is allowed.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return 0;
        }
        tv.tv_sec as i64
    }

    fn set(&mut self, epoch_secs: i64) {
        let tv = esp_idf_svc::sys::timeval {
            tv_sec: epoch_secs as esp_idf_svc::sys::time_t,
            tv_usec: 0,
        };
        // SAFETY: `tv` outlives the call; null timezone is allowed.
        if unsafe { esp_idf_svc::sys::settimeofday(&tv, core::ptr::null()) } != 0 {
            log::warn!("time: settimeofday failed");
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for WallClock {
    fn now(&self) -> i64 {
        let elapsed = i64::try_from(self.set_at.elapsed().as_secs()).unwrap_or(i64::MAX);
        self.base.saturating_add(elapsed)
    }

    fn set(&mut self, epoch_secs: i64) {
        self.base = epoch_secs;
        self.set_at = std::time::Instant::now();
    }
}

// ── Monotonic uptime ──────────────────────────────────────────

pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl MonotonicPort for Uptime {
    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads the free-running system timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
