//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the sensor inputs, indicator LEDs and the siren, exposing them
//! through [`SensorPort`] and [`IndicatorPort`].  The keypad pins are not
//! part of this adapter; they go straight into
//! [`MatrixKeypad`](crate::keypad::matrix::MatrixKeypad).  On non-espidf
//! targets the underlying drivers use the `hw_init` simulation stubs.

use crate::app::ports::{IndicatorPort, SensorPort, SirenMode};
use crate::drivers::gpio::{GpioInput, GpioOutput};
use crate::drivers::hw_init::{self, ADC_FULL_SCALE, ADC1_CH_LM35};
use crate::drivers::siren::Siren;
use crate::pins;

/// Concrete adapter that combines the board I/O behind port traits.
pub struct HardwareAdapter {
    gas: GpioInput,
    test_button: GpioInput,
    alarm_led: GpioOutput,
    incorrect_code_led: GpioOutput,
    system_blocked_led: GpioOutput,
    siren: Siren,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    /// Build from the pin map.  Call after `hw_init::init_peripherals()`.
    pub fn new() -> Self {
        Self {
            gas: GpioInput::new(pins::GAS_DETECTOR_GPIO),
            test_button: GpioInput::new(pins::TEST_BUTTON_GPIO),
            alarm_led: GpioOutput::new(pins::ALARM_LED_GPIO),
            incorrect_code_led: GpioOutput::new(pins::INCORRECT_CODE_LED_GPIO),
            system_blocked_led: GpioOutput::new(pins::SYSTEM_BLOCKED_LED_GPIO),
            siren: Siren::new(pins::SIREN_GPIO),
        }
    }

    pub fn siren(&self) -> &Siren {
        &self.siren
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_temperature_raw(&mut self) -> f32 {
        f32::from(hw_init::adc1_read(ADC1_CH_LM35)) / ADC_FULL_SCALE
    }

    fn gas_line_high(&mut self) -> bool {
        self.gas.level()
    }

    fn test_button_pressed(&mut self) -> bool {
        self.test_button.level()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_alarm_led(&mut self, on: bool) {
        self.alarm_led.set(on);
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        self.incorrect_code_led.set(on);
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        self.system_blocked_led.set(on);
    }

    fn set_siren(&mut self, mode: SirenMode) {
        self.siren.set_mode(mode);
    }
}
