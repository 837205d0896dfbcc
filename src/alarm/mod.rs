//! Alarm arbitration — merges hazard sources into one alarm output.
//!
//! ```text
//!  gas ─────┐
//!  over-temp┼──▶ latch active + detector latches ──▶ blink period ──▶ alarm LED
//!  test btn ┘                                    └──────────────────▶ siren mode
//! ```
//!
//! Once active, the alarm and its detector latches stay set until a
//! successful disarm.  The blink cadence is chosen from the latches, not
//! from the live sensor flags, so a flickering sensor does not change the
//! pattern mid-episode.
//!
//! | Latched                  | Blink period |
//! |--------------------------|--------------|
//! | gas + over-temperature   | 100 ms       |
//! | gas only                 | 1000 ms      |
//! | over-temperature only    | 500 ms       |

pub mod code;

use log::info;

use crate::app::ports::{IndicatorPort, SirenMode};
use crate::config::AlarmConfig;
use crate::sensors::HazardSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlarmState {
    pub active: bool,
    /// Time accumulated toward the next indicator toggle (ms).
    pub accumulated_ms: u32,
    /// Current alarm LED level.
    pub led_phase: bool,
    pub gas_latched: bool,
    pub over_temp_latched: bool,
}

/// Blink periods, one per latch combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPeriods {
    pub gas_and_over_temp_ms: u32,
    pub gas_ms: u32,
    pub over_temp_ms: u32,
}

impl BlinkPeriods {
    pub fn from_config(config: &AlarmConfig) -> Self {
        Self {
            gas_and_over_temp_ms: config.blink_gas_and_over_temp_ms,
            gas_ms: config.blink_gas_ms,
            over_temp_ms: config.blink_over_temp_ms,
        }
    }

    /// Period for the given latches.  `None` when nothing is latched.
    pub fn select(&self, gas: bool, over_temp: bool) -> Option<u32> {
        match (gas, over_temp) {
            (true, true) => Some(self.gas_and_over_temp_ms),
            (true, false) => Some(self.gas_ms),
            (false, true) => Some(self.over_temp_ms),
            (false, false) => None,
        }
    }
}

pub struct AlarmArbitrator {
    state: AlarmState,
    periods: BlinkPeriods,
    tick_ms: u32,
}

impl AlarmArbitrator {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            state: AlarmState::default(),
            periods: BlinkPeriods::from_config(config),
            tick_ms: config.tick_ms,
        }
    }

    /// One arbitration step.  Drives the alarm LED and the siren.
    pub fn update(&mut self, snapshot: &HazardSnapshot, hw: &mut impl IndicatorPort) {
        let s = &mut self.state;
        let hazards = snapshot.hazards;

        if hazards.gas_detected || hazards.over_temperature || snapshot.test_button_pressed {
            if !s.active {
                info!(
                    "alarm: activated (gas={} over_temp={} test={})",
                    hazards.gas_detected, hazards.over_temperature, snapshot.test_button_pressed
                );
            }
            s.active = true;
        }
        if hazards.gas_detected || snapshot.test_button_pressed {
            s.gas_latched = true;
        }
        if hazards.over_temperature || snapshot.test_button_pressed {
            s.over_temp_latched = true;
        }

        if s.active {
            s.accumulated_ms = s.accumulated_ms.saturating_add(self.tick_ms);
            if let Some(period) = self.periods.select(s.gas_latched, s.over_temp_latched) {
                if s.accumulated_ms >= period {
                    s.accumulated_ms = 0;
                    s.led_phase = !s.led_phase;
                }
            }
            hw.set_siren(SirenMode::DrivenLow);
        } else {
            s.led_phase = false;
            s.gas_latched = false;
            s.over_temp_latched = false;
            s.accumulated_ms = 0;
            hw.set_siren(SirenMode::HighImpedance);
        }
        hw.set_alarm_led(s.led_phase);
    }

    /// Clear the alarm after a successful disarm.  Indicators follow on
    /// the next [`update`](Self::update).
    pub fn deactivate(&mut self) {
        if self.state.active {
            info!("alarm: deactivated");
        }
        self.state.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    /// Blink period currently in force, if the alarm is active.
    pub fn blink_period_ms(&self) -> Option<u32> {
        if !self.state.active {
            return None;
        }
        self.periods
            .select(self.state.gas_latched, self.state.over_temp_latched)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut AlarmState {
        &mut self.state
    }
}
