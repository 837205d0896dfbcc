//! Sensor subsystem — hazard detection from the raw sensor port.
//!
//! [`SensorAggregator::sample`] reads every line exactly once per tick and
//! returns a [`HazardSnapshot`].  Everything downstream (alarm latching,
//! console reports, the event logger) works from that snapshot, so all
//! consumers within a tick agree.

pub mod temperature;

use log::debug;

use crate::app::ports::SensorPort;
use crate::config::AlarmConfig;
use temperature::{TemperatureWindow, lm35_to_celsius};

/// Instantaneous hazard conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HazardFlags {
    pub gas_detected: bool,
    pub over_temperature: bool,
}

/// Everything the controller learned from the sensors this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HazardSnapshot {
    pub hazards: HazardFlags,
    pub test_button_pressed: bool,
    /// Smoothed temperature in °C.
    pub temperature_c: f32,
}

pub struct SensorAggregator {
    window: TemperatureWindow,
    last: HazardSnapshot,
    over_temp_c: f32,
    lm35_vref: f32,
    lm35_volts_per_c: f32,
}

impl SensorAggregator {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            window: TemperatureWindow::new(),
            last: HazardSnapshot::default(),
            over_temp_c: config.over_temp_c,
            lm35_vref: config.lm35_vref,
            lm35_volts_per_c: config.lm35_volts_per_c,
        }
    }

    /// Read all sensor lines and update the smoothed temperature.
    pub fn sample(&mut self, hw: &mut impl SensorPort) -> HazardSnapshot {
        let raw = hw.read_temperature_raw();
        let avg = self.window.push(raw);
        let temperature_c = lm35_to_celsius(avg, self.lm35_vref, self.lm35_volts_per_c);

        let hazards = HazardFlags {
            gas_detected: !hw.gas_line_high(),
            over_temperature: temperature_c > self.over_temp_c,
        };

        if hazards != self.last.hazards {
            debug!(
                "sensors: gas={} over_temp={} ({:.1} C)",
                hazards.gas_detected, hazards.over_temperature, temperature_c
            );
        }

        self.last = HazardSnapshot {
            hazards,
            test_button_pressed: hw.test_button_pressed(),
            temperature_c,
        };
        self.last
    }

    /// Snapshot from the most recent [`sample`](Self::sample).
    pub fn last(&self) -> &HazardSnapshot {
        &self.last
    }

    pub fn current_temperature_c(&self) -> f32 {
        self.last.temperature_c
    }

    pub fn is_over_temperature(&self) -> bool {
        self.last.hazards.over_temperature
    }

    pub fn is_gas_detected(&self) -> bool {
        self.last.hazards.gas_detected
    }
}
