//! `embedded-hal` wrappers over raw GPIO numbers.
//!
//! Pins are configured once in [`hw_init`](super::hw_init); these handles
//! only read and write levels.  Errors are impossible at this layer, so
//! the error type is [`Infallible`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::hw_init;

#[derive(Debug)]
pub struct GpioInput {
    gpio: i32,
}

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// `true` = HIGH.
    pub fn level(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level())
    }
}

#[derive(Debug)]
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn set(&mut self, high: bool) {
        hw_init::gpio_write(self.gpio, high);
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn output_drives_input_in_sim() {
        // Pin 41 is unassigned on the board.
        let mut out = GpioOutput::new(41);
        let mut inp = GpioInput::new(41);
        out.set_low().unwrap();
        assert!(inp.is_low().unwrap());
        out.set_high().unwrap();
        assert!(inp.is_high().unwrap());
    }
}
