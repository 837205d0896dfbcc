//! Fuzz target: console command stream
//!
//! Feeds arbitrary bytes to the serial console of a running
//! `AlarmService` and checks that it never panics, that the attempt
//! counter never exceeds the lockout limit, and that the blocked LED
//! always matches the controller.
//!
//! cargo fuzz run fuzz_console

#![no_main]

use std::collections::VecDeque;

use hazard_alarm::app::ports::{ClockPort, IndicatorPort, SensorPort, SerialPort, SirenMode};
use hazard_alarm::error::SerialError;
use hazard_alarm::keypad::KeyScanner;
use hazard_alarm::{AlarmConfig, AlarmService};
use libfuzzer_sys::fuzz_target;

struct Board {
    gas_low: bool,
    blocked_led: bool,
}

impl SensorPort for Board {
    fn read_temperature_raw(&mut self) -> f32 {
        0.2
    }
    fn gas_line_high(&mut self) -> bool {
        !self.gas_low
    }
    fn test_button_pressed(&mut self) -> bool {
        false
    }
}

impl IndicatorPort for Board {
    fn set_alarm_led(&mut self, _on: bool) {}
    fn set_incorrect_code_led(&mut self, _on: bool) {}
    fn set_system_blocked_led(&mut self, on: bool) {
        self.blocked_led = on;
    }
    fn set_siren(&mut self, _mode: SirenMode) {}
}

struct NoKeys;

impl KeyScanner for NoKeys {
    fn scan(&mut self) -> Option<char> {
        None
    }
}

/// Input runs dry mid-command: reads then fail with `Closed`.
struct Line {
    input: VecDeque<u8>,
}

impl SerialPort for Line {
    fn readable(&mut self) -> bool {
        !self.input.is_empty()
    }
    fn read_byte(&mut self) -> Result<u8, SerialError> {
        self.input.pop_front().ok_or(SerialError::Closed)
    }
    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), SerialError> {
        Ok(())
    }
}

struct Wall(i64);

impl ClockPort for Wall {
    fn now(&self) -> i64 {
        self.0
    }
    fn set(&mut self, epoch_secs: i64) {
        self.0 = epoch_secs;
    }
}

fuzz_target!(|data: &[u8]| {
    let config = AlarmConfig::default();
    let mut app = AlarmService::new(&config);
    let mut board = Board {
        gas_low: data.first().is_some_and(|b| b & 1 == 1),
        blocked_led: false,
    };
    let mut line = Line {
        input: data.iter().copied().collect(),
    };
    let mut wall = Wall(0);

    // Each tick consumes at least one byte while any remain.
    for _ in 0..=data.len() {
        app.tick(&mut board, &mut NoKeys, &mut line, &mut wall);
        assert!(app.disarm().attempts() <= config.max_incorrect_attempts);
        assert_eq!(board.blocked_led, app.disarm().is_blocked());
    }
    assert!(line.input.is_empty());
});
