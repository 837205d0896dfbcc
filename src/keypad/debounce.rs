//! Keypad debounce state machine.
//!
//! Converts raw scans into discrete *release* events.  A key is reported
//! once, when it is let go after passing the debounce check.
//!
//! | State    | Scan result              | Next state | Emits        |
//! |----------|--------------------------|------------|--------------|
//! | Scanning | key `k`                  | Debounce   | —            |
//! | Scanning | none                     | Scanning   | —            |
//! | Debounce | elapsed < debounce       | Debounce   | —            |
//! | Debounce | elapsed ≥ debounce, `k`  | Held       | —            |
//! | Debounce | elapsed ≥ debounce, else | Scanning   | —            |
//! | Held     | `k`                      | Held       | —            |
//! | Held     | none                     | Scanning   | `k`          |
//! | Held     | other key                | Scanning   | —            |
//!
//! `Debounce` only re-scans once the threshold is reached; it does not
//! watch the line in between.

use crate::config::AlarmConfig;

use super::KeyScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadState {
    Scanning,
    Debounce { key: char, elapsed_ms: u32 },
    Held { key: char },
}

pub struct KeypadDebouncer {
    state: KeypadState,
    tick_ms: u32,
    debounce_ms: u32,
}

impl KeypadDebouncer {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            state: KeypadState::Scanning,
            tick_ms: config.tick_ms,
            debounce_ms: config.debounce_ms,
        }
    }

    /// Advance one tick.  Returns the key released on this tick, if any.
    pub fn update(&mut self, scanner: &mut impl KeyScanner) -> Option<char> {
        match self.state {
            KeypadState::Scanning => self.on_scanning(scanner),
            KeypadState::Debounce { key, elapsed_ms } => self.on_debounce(scanner, key, elapsed_ms),
            KeypadState::Held { key } => self.on_held(scanner, key),
        }
    }

    fn on_scanning(&mut self, scanner: &mut impl KeyScanner) -> Option<char> {
        if let Some(key) = scanner.scan() {
            self.state = KeypadState::Debounce { key, elapsed_ms: 0 };
        }
        None
    }

    fn on_debounce(&mut self, scanner: &mut impl KeyScanner, key: char, elapsed_ms: u32) -> Option<char> {
        self.state = if elapsed_ms >= self.debounce_ms {
            if scanner.scan() == Some(key) {
                KeypadState::Held { key }
            } else {
                KeypadState::Scanning
            }
        } else {
            KeypadState::Debounce {
                key,
                elapsed_ms: elapsed_ms.saturating_add(self.tick_ms),
            }
        };
        None
    }

    fn on_held(&mut self, scanner: &mut impl KeyScanner, key: char) -> Option<char> {
        match scanner.scan() {
            Some(k) if k == key => None,
            None => {
                self.state = KeypadState::Scanning;
                Some(key)
            }
            Some(_) => {
                self.state = KeypadState::Scanning;
                None
            }
        }
    }

    pub fn state(&self) -> KeypadState {
        self.state
    }

    /// Drop any in-progress press.
    pub fn reset(&mut self) {
        self.state = KeypadState::Scanning;
    }
}
