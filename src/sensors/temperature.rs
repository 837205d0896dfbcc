//! LM35 temperature conversion and rolling average.
//!
//! The LM35 outputs 10 mV/°C.  The ADC reading arrives normalised to
//! `0.0..=1.0` of full scale, so
//!
//! ```text
//! °C = reading × V_ref / (V per °C)
//! ```
//!
//! Readings are smoothed over a fixed window.  The window starts zero-filled,
//! so the average ramps up over the first [`TEMPERATURE_WINDOW`] ticks.

use crate::config::TEMPERATURE_WINDOW;

/// Convert a normalised ADC reading to degrees Celsius.
pub fn lm35_to_celsius(reading: f32, vref: f32, volts_per_c: f32) -> f32 {
    reading * vref / volts_per_c
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fixed-size ring of raw readings with a full-window mean.
pub struct TemperatureWindow {
    samples: [f32; TEMPERATURE_WINDOW],
    write_index: usize,
    average: f32,
}

impl Default for TemperatureWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureWindow {
    pub fn new() -> Self {
        Self {
            samples: [0.0; TEMPERATURE_WINDOW],
            write_index: 0,
            average: 0.0,
        }
    }

    /// Store one reading and recompute the mean over the whole window.
    ///
    /// The sum is recomputed from scratch each time so rounding error
    /// cannot accumulate.
    pub fn push(&mut self, reading: f32) -> f32 {
        self.samples[self.write_index] = reading;
        self.write_index = (self.write_index + 1) % TEMPERATURE_WINDOW;
        let sum: f32 = self.samples.iter().sum();
        self.average = sum / TEMPERATURE_WINDOW as f32;
        self.average
    }

    pub fn average(&self) -> f32 {
        self.average
    }
}
