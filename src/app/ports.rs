//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (sensors, indicators, serial console, clocks) implement
//! these traits.  The [`AlarmService`](super::service::AlarmService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Every port is a plain synchronous primitive: the controller
//! polls, nothing calls back.

use core::fmt;

use crate::error::SerialError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: raw sensor lines, sampled once per tick.
pub trait SensorPort {
    /// LM35 analog reading normalised to `0.0..=1.0` of ADC full scale.
    fn read_temperature_raw(&mut self) -> f32;

    /// Electrical level of the gas detector line (`true` = HIGH).
    /// The detector is active-low.
    fn gas_line_high(&mut self) -> bool;

    /// `true` while the alarm test button is held.
    fn test_button_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Electrical mode of the siren driver pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SirenMode {
    /// Pin configured as input: the siren is silent.
    HighImpedance,
    /// Pin configured as open-drain output and pulled LOW: the siren sounds.
    DrivenLow,
}

/// Write-side port: LEDs and siren.
pub trait IndicatorPort {
    fn set_alarm_led(&mut self, on: bool);

    fn set_incorrect_code_led(&mut self, on: bool);

    fn set_system_blocked_led(&mut self, on: bool);

    /// Switch the siren pin mode.  This is a pin *mode* change, not a
    /// level write.
    fn set_siren(&mut self, mode: SirenMode);
}

// ───────────────────────────────────────────────────────────────
// Serial console port
// ───────────────────────────────────────────────────────────────

/// Byte-oriented serial console.
///
/// `read_byte` blocks until a byte arrives.  The main loop only calls it
/// after `readable()` returned `true`, except inside multi-character
/// console prompts where blocking is intended.
pub trait SerialPort {
    /// At least one received byte is waiting.
    fn readable(&mut self) -> bool;

    /// Blocking single-byte read.
    fn read_byte(&mut self) -> Result<u8, SerialError>;

    /// Write raw bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError>;

    fn write_str(&mut self, s: &str) -> Result<(), SerialError> {
        self.write_bytes(s.as_bytes())
    }

    /// Formatted write through a fixed stack buffer, so `write!(serial, ..)`
    /// works without allocation.  Lines longer than the buffer are rejected.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), SerialError> {
        let mut line: heapless::String<128> = heapless::String::new();
        fmt::write(&mut line, args).map_err(|_| SerialError::WriteFailed)?;
        self.write_str(&line)
    }
}

// ───────────────────────────────────────────────────────────────
// Clock ports
// ───────────────────────────────────────────────────────────────

/// Wall clock in seconds since the Unix epoch.  Settable from the console.
pub trait ClockPort {
    fn now(&self) -> i64;

    fn set(&mut self, epoch_secs: i64);
}

/// Monotonic time source used to pace the main loop.
pub trait MonotonicPort {
    /// Milliseconds since boot.
    fn uptime_ms(&self) -> u64;
}
