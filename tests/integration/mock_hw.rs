//! Mock board, keypad, terminal and wall clock for the integration suite.
//!
//! [`Rig`] bundles an [`AlarmService`] with one of each mock and advances
//! them together, one tick at a time.

use std::collections::VecDeque;

use hazard_alarm::app::ports::{ClockPort, IndicatorPort, SensorPort, SerialPort, SirenMode};
use hazard_alarm::error::SerialError;
use hazard_alarm::keypad::KeyScanner;
use hazard_alarm::{AlarmConfig, AlarmService};

/// Every indicator write, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorCall {
    AlarmLed(bool),
    IncorrectCodeLed(bool),
    SystemBlockedLed(bool),
    Siren(SirenMode),
}

#[derive(Default)]
pub struct MockBoard {
    /// Normalised LM35 reading, 0.0..=1.0 of full scale.
    pub temperature_raw: f32,
    /// Gas detector output is active-low.
    pub gas_low: bool,
    pub test_button: bool,
    pub calls: Vec<IndicatorCall>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn alarm_led(&self) -> bool {
        self.last(|c| match c {
            IndicatorCall::AlarmLed(on) => Some(on),
            _ => None,
        })
        .unwrap_or(false)
    }

    pub fn incorrect_code_led(&self) -> bool {
        self.last(|c| match c {
            IndicatorCall::IncorrectCodeLed(on) => Some(on),
            _ => None,
        })
        .unwrap_or(false)
    }

    pub fn system_blocked_led(&self) -> bool {
        self.last(|c| match c {
            IndicatorCall::SystemBlockedLed(on) => Some(on),
            _ => None,
        })
        .unwrap_or(false)
    }

    pub fn siren(&self) -> Option<SirenMode> {
        self.last(|c| match c {
            IndicatorCall::Siren(mode) => Some(mode),
            _ => None,
        })
    }

    /// Alarm LED level written on each tick, oldest first.
    pub fn alarm_led_history(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                IndicatorCall::AlarmLed(on) => Some(on),
                _ => None,
            })
            .collect()
    }

    fn last<T>(&self, pick: impl Fn(IndicatorCall) -> Option<T>) -> Option<T> {
        self.calls.iter().rev().find_map(|c| pick(*c))
    }
}

impl SensorPort for MockBoard {
    fn read_temperature_raw(&mut self) -> f32 {
        self.temperature_raw
    }

    fn gas_line_high(&mut self) -> bool {
        !self.gas_low
    }

    fn test_button_pressed(&mut self) -> bool {
        self.test_button
    }
}

impl IndicatorPort for MockBoard {
    fn set_alarm_led(&mut self, on: bool) {
        self.calls.push(IndicatorCall::AlarmLed(on));
    }

    fn set_incorrect_code_led(&mut self, on: bool) {
        self.calls.push(IndicatorCall::IncorrectCodeLed(on));
    }

    fn set_system_blocked_led(&mut self, on: bool) {
        self.calls.push(IndicatorCall::SystemBlockedLed(on));
    }

    fn set_siren(&mut self, mode: SirenMode) {
        self.calls.push(IndicatorCall::Siren(mode));
    }
}

/// Keypad whose raw contact state follows a per-tick timeline.
///
/// [`advance`](Self::advance) moves to the next tick; every scan within a
/// tick sees the same level.
#[derive(Default)]
pub struct ScriptedKeypad {
    timeline: VecDeque<Option<char>>,
    current: Option<char>,
    pub scans: usize,
}

#[allow(dead_code)]
impl ScriptedKeypad {
    /// Hold `key` for `ticks` ticks.
    pub fn hold(&mut self, key: char, ticks: usize) {
        self.timeline.extend(std::iter::repeat_n(Some(key), ticks));
    }

    /// No key for `ticks` ticks.
    pub fn idle(&mut self, ticks: usize) {
        self.timeline.extend(std::iter::repeat_n(None, ticks));
    }

    /// A clean press: long enough to pass the debouncer, then released.
    pub fn press(&mut self, key: char) {
        self.hold(key, 8);
        self.idle(2);
    }

    pub fn type_keys(&mut self, keys: &str) {
        for k in keys.chars() {
            self.press(k);
        }
    }

    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    pub fn advance(&mut self) {
        self.current = self.timeline.pop_front().flatten();
    }
}

impl KeyScanner for ScriptedKeypad {
    fn scan(&mut self) -> Option<char> {
        self.scans += 1;
        self.current
    }
}

#[derive(Default)]
pub struct MockSerial {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn send(&mut self, text: &str) {
        self.input.extend(text.bytes());
    }

    /// Everything written since the last call.
    pub fn take_output(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.output).into_owned();
        self.output.clear();
        text
    }
}

impl SerialPort for MockSerial {
    fn readable(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        self.input.pop_front().ok_or(SerialError::Closed)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClock {
    pub epoch_secs: i64,
}

impl ClockPort for FakeClock {
    fn now(&self) -> i64 {
        self.epoch_secs
    }

    fn set(&mut self, epoch_secs: i64) {
        self.epoch_secs = epoch_secs;
    }
}

pub struct Rig {
    pub app: AlarmService,
    pub board: MockBoard,
    pub keypad: ScriptedKeypad,
    pub serial: MockSerial,
    pub clock: FakeClock,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(&AlarmConfig::default())
    }

    pub fn with_config(config: &AlarmConfig) -> Self {
        Self {
            app: AlarmService::new(config),
            board: MockBoard::default(),
            keypad: ScriptedKeypad::default(),
            serial: MockSerial::default(),
            clock: FakeClock::default(),
        }
    }

    pub fn tick(&mut self) {
        self.keypad.advance();
        self.app
            .tick(&mut self.board, &mut self.keypad, &mut self.serial, &mut self.clock);
    }

    pub fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Tick until the keypad timeline is exhausted, plus one settling tick.
    pub fn drain_keys(&mut self) {
        while self.keypad.pending() > 0 {
            self.tick();
        }
        self.tick();
    }
}
