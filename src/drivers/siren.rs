//! Siren driver.
//!
//! The siren module sounds when its control line is pulled LOW and stays
//! silent when the line floats.  "Off" is therefore a pin *mode* change
//! (back to input), not a HIGH level: driving HIGH would fight the
//! module's own pull-up.

use log::debug;

use crate::app::ports::SirenMode;

use super::hw_init;

pub struct Siren {
    gpio: i32,
    mode: SirenMode,
}

impl Siren {
    /// `hw_init` leaves the pin as an input, so the siren starts silent.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            mode: SirenMode::HighImpedance,
        }
    }

    /// Switch pin mode.  No-op when already in `mode`.
    pub fn set_mode(&mut self, mode: SirenMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            SirenMode::DrivenLow => hw_init::gpio_drive_open_drain_low(self.gpio),
            SirenMode::HighImpedance => hw_init::gpio_release(self.gpio),
        }
        debug!("siren: {:?}", mode);
        self.mode = mode;
    }

    pub fn mode(&self) -> SirenMode {
        self.mode
    }

    pub fn is_sounding(&self) -> bool {
        self.mode == SirenMode::DrivenLow
    }
}
