//! System configuration parameters
//!
//! All tunable parameters for the alarm controller.  There is no runtime
//! persistence: the device uses [`AlarmConfig::default()`] unless a JSON
//! override is baked in at build time (`ALARM_CONFIG_JSON`).
//!
//! Structural sizes (code length, averaging window, event capacity) are
//! compile-time constants because they size fixed buffers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of digits in a disarm code.
pub const CODE_LENGTH: usize = 3;
/// Number of temperature samples in the rolling average window.
pub const TEMPERATURE_WINDOW: usize = 100;
/// Capacity of the event ring buffer.
pub const EVENT_LOG_CAPACITY: usize = 100;
/// Maximum length of an event label (`"OVER_TEMP_OFF"` is the longest).
pub const EVENT_LABEL_LEN: usize = 14;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- Timing ---
    /// Main loop period (milliseconds)
    pub tick_ms: u32,
    /// Time a key must stay stable before it counts as pressed (milliseconds)
    pub debounce_ms: u32,

    // --- Alarm indicator blink periods ---
    /// Gas and over-temperature both latched (milliseconds)
    pub blink_gas_and_over_temp_ms: u32,
    /// Gas only (milliseconds)
    pub blink_gas_ms: u32,
    /// Over-temperature only (milliseconds)
    pub blink_over_temp_ms: u32,

    // --- Temperature ---
    /// Over-temperature threshold (Celsius, strict greater-than)
    pub over_temp_c: f32,
    /// Full-scale ADC voltage used by the LM35 conversion
    pub lm35_vref: f32,
    /// LM35 sensitivity in volts per degree Celsius
    pub lm35_volts_per_c: f32,

    // --- Code entry ---
    /// Compiled-in disarm code, replaced by the startup prompt
    pub default_code: heapless::String<CODE_LENGTH>,
    /// Incorrect attempts before the system blocks
    pub max_incorrect_attempts: u8,
    /// `#` presses needed to acknowledge an incorrect-code indication
    pub ack_presses: u8,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        let mut default_code = heapless::String::new();
        let _ = default_code.push_str("180");

        Self {
            // Timing
            tick_ms: 10,
            debounce_ms: 40,

            // Blink periods
            blink_gas_and_over_temp_ms: 100,
            blink_gas_ms: 1000,
            blink_over_temp_ms: 500,

            // Temperature
            over_temp_c: 50.0,
            lm35_vref: 3.3,
            lm35_volts_per_c: 0.01,

            // Code entry
            default_code,
            max_incorrect_attempts: 5,
            ack_presses: 2,
        }
    }
}

impl AlarmConfig {
    /// Parse a JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the tick arithmetic or code entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be non-zero"));
        }
        let periods = [
            self.debounce_ms,
            self.blink_gas_and_over_temp_ms,
            self.blink_gas_ms,
            self.blink_over_temp_ms,
        ];
        if periods.iter().any(|p| *p == 0 || p % self.tick_ms != 0) {
            return Err(ConfigError::Invalid(
                "debounce and blink periods must be non-zero multiples of tick_ms",
            ));
        }
        if self.lm35_volts_per_c <= 0.0 || self.lm35_vref <= 0.0 {
            return Err(ConfigError::Invalid("LM35 scale must be positive"));
        }
        if self.default_code.len() != CODE_LENGTH
            || !self.default_code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ConfigError::Invalid("default_code must be exactly 3 digits"));
        }
        if self.max_incorrect_attempts == 0 {
            return Err(ConfigError::Invalid("max_incorrect_attempts must be non-zero"));
        }
        if self.ack_presses == 0 {
            return Err(ConfigError::Invalid("ack_presses must be non-zero"));
        }
        Ok(())
    }

    /// Default code as a fixed digit array.
    pub fn default_code_digits(&self) -> [u8; CODE_LENGTH] {
        let mut digits = [b'0'; CODE_LENGTH];
        for (slot, b) in digits.iter_mut().zip(self.default_code.bytes()) {
            *slot = b;
        }
        digits
    }
}
