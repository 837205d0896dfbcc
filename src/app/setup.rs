//! Startup code prompt.
//!
//! Before the main loop starts, the operator types a new disarm code on
//! the keypad: N digits, then `#`.  Digits are echoed; anything else is
//! ignored.  `#` before N digits are collected is ignored too.

use crate::config::CODE_LENGTH;
use crate::error::SerialError;
use crate::keypad::TERMINATOR;

use super::ports::SerialPort;

pub const PROMPT: &str = "Enter 3-digit deactivation code, end with '#'\r\n> ";

#[derive(Debug, Default)]
pub struct SetupPrompt {
    digits: heapless::Vec<u8, CODE_LENGTH>,
    terminated: bool,
}

impl SetupPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, serial: &mut impl SerialPort) -> Result<(), SerialError> {
        serial.write_str(PROMPT)
    }

    /// Feed one released key.  Returns the code once `#` completes it.
    ///
    /// Keys are taken before they are echoed, so a failed echo never
    /// loses one; [`Self::code`] still reports the completed code.
    pub fn feed(
        &mut self,
        key: char,
        serial: &mut impl SerialPort,
    ) -> Result<Option<[u8; CODE_LENGTH]>, SerialError> {
        if key.is_ascii_digit() {
            // Extra digits beyond N are dropped.
            if let Ok(digit) = u8::try_from(key) {
                if self.digits.push(digit).is_ok() {
                    serial.write_bytes(&[digit])?;
                }
            }
            return Ok(None);
        }
        if key == TERMINATOR && self.digits.is_full() {
            self.terminated = true;
            serial.write_str("\r\n")?;
            return Ok(self.code());
        }
        Ok(None)
    }

    /// The entered code, once `#` has completed it.
    pub fn code(&self) -> Option<[u8; CODE_LENGTH]> {
        if !self.terminated {
            return None;
        }
        let mut code = [0u8; CODE_LENGTH];
        code.copy_from_slice(&self.digits);
        Some(code)
    }

    pub fn collected(&self) -> usize {
        self.digits.len()
    }
}
