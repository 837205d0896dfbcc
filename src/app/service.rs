//! Application service — the hexagonal core.
//!
//! [`AlarmService`] owns every domain component and runs them in a fixed
//! order once per tick.  All I/O flows through port traits injected at
//! call sites, so the whole controller runs against mock adapters in
//! tests.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ IndicatorPort
//!  KeyScanner ──▶ │         AlarmService         │
//!  SerialPort ◀─▶ │ sensors · alarm · disarm ·   │
//!   ClockPort ──▶ │ console · event log          │
//!                 └──────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::alarm::AlarmArbitrator;
use crate::alarm::code::{DisarmController, DisarmOutcome};
use crate::config::{AlarmConfig, CODE_LENGTH};
use crate::console::{self, ConsoleContext};
use crate::error::SerialError;
use crate::event_log::{EventLog, EventLogger, SignalLevels};
use crate::keypad::KeyScanner;
use crate::keypad::debounce::{KeypadDebouncer, KeypadState};
use crate::scheduler::TickScheduler;
use crate::sensors::SensorAggregator;

use super::ports::{ClockPort, IndicatorPort, MonotonicPort, SensorPort, SerialPort};
use super::setup::SetupPrompt;

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

pub struct AlarmService {
    debouncer: KeypadDebouncer,
    sensors: SensorAggregator,
    alarm: AlarmArbitrator,
    disarm: DisarmController,
    logger: EventLogger,
    tick_count: u64,
}

impl AlarmService {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            debouncer: KeypadDebouncer::new(config),
            sensors: SensorAggregator::new(config),
            alarm: AlarmArbitrator::new(config),
            disarm: DisarmController::new(config),
            logger: EventLogger::new(),
            tick_count: 0,
        }
    }

    // ── Startup ───────────────────────────────────────────────

    /// Blocking startup prompt: pace the keypad until a full code is
    /// entered, then install it.  Serial failures are logged and the
    /// prompt keeps collecting keys, so a dead console still reaches the
    /// main loop.
    pub fn run_setup<D: DelayNs, M: MonotonicPort>(
        &mut self,
        keypad: &mut impl KeyScanner,
        serial: &mut impl SerialPort,
        scheduler: &mut TickScheduler<D, M>,
    ) {
        let mut prompt = SetupPrompt::new();
        if let Err(e) = prompt.begin(serial) {
            warn!("setup prompt failed: {}", e);
        }
        let code = loop {
            let step = scheduler.pace(|| self.setup_step(&mut prompt, &mut *keypad, &mut *serial));
            if let Err(e) = step {
                warn!("setup echo failed: {}", e);
            }
            if let Some(code) = prompt.code() {
                break code;
            }
        };
        if let Err(e) = self.install_code(code, serial) {
            warn!("code announcement failed: {}", e);
        }
    }

    /// One tick of the startup prompt.
    pub fn setup_step(
        &mut self,
        prompt: &mut SetupPrompt,
        keypad: &mut impl KeyScanner,
        serial: &mut impl SerialPort,
    ) -> Result<Option<[u8; CODE_LENGTH]>, SerialError> {
        match self.debouncer.update(keypad) {
            Some(key) => prompt.feed(key, serial),
            None => Ok(None),
        }
    }

    pub fn install_code(
        &mut self,
        code: [u8; CODE_LENGTH],
        serial: &mut impl SerialPort,
    ) -> Result<(), SerialError> {
        self.disarm.set_code(code);
        self.debouncer.reset();
        info!("AlarmService ready");
        serial.write_str("New code is:")?;
        for digit in code {
            write!(serial, " {}", char::from(digit))?;
        }
        serial.write_str("\r\nCode set. System ready.\r\n")
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: sensors → alarm → keypad disarm → console →
    /// indicators → event log.
    ///
    /// `hw` satisfies both [`SensorPort`] and [`IndicatorPort`], which
    /// avoids a double mutable borrow of the board adapter.  Serial
    /// failures are logged and never stop the loop.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort),
        keypad: &mut impl KeyScanner,
        serial: &mut impl SerialPort,
        clock: &mut impl ClockPort,
    ) {
        self.tick_count += 1;

        // 1. Sensors
        let snapshot = self.sensors.sample(hw);

        // 2. Alarm arbitration (alarm LED + siren)
        self.alarm.update(&snapshot, hw);

        // 3. Keypad disarm path (skipped entirely once blocked)
        if let Err(e) = self.disarm_step(keypad, serial) {
            warn!("keypad echo failed: {}", e);
        }

        // 4. Console
        let mut ctx = ConsoleContext {
            alarm: &mut self.alarm,
            disarm: &mut self.disarm,
            sensors: &self.sensors,
            events: self.logger.log(),
        };
        if let Err(e) = console::poll(&mut ctx, serial, clock) {
            warn!("console command failed: {}", e);
        }

        // 5. Code indicators
        hw.set_incorrect_code_led(self.disarm.incorrect_code_lit());
        hw.set_system_blocked_led(self.disarm.is_blocked());

        // 6. Event log
        let levels = self.signal_levels();
        if let Err(e) = self.logger.update(&levels, clock, serial) {
            warn!("event mirror failed: {}", e);
        }
    }

    fn disarm_step(
        &mut self,
        keypad: &mut impl KeyScanner,
        serial: &mut impl SerialPort,
    ) -> Result<(), SerialError> {
        if self.disarm.is_blocked() {
            return Ok(());
        }
        let Some(key) = self.debouncer.update(keypad) else {
            return Ok(());
        };
        match self.disarm.on_key(key, self.alarm.is_active()) {
            DisarmOutcome::Stored(k) => {
                let mut buf = [0u8; 4];
                serial.write_str(k.encode_utf8(&mut buf))
            }
            DisarmOutcome::Accepted => {
                self.alarm.deactivate();
                serial.write_str("\r\n")
            }
            DisarmOutcome::Blocked => Ok(()),
            DisarmOutcome::AckPending
            | DisarmOutcome::Acknowledged
            | DisarmOutcome::Idle
            | DisarmOutcome::Rejected { .. } => serial.write_str("\r\n"),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Levels of the five logged channels as of the last tick.
    pub fn signal_levels(&self) -> SignalLevels {
        let hazards = self.sensors.last().hazards;
        SignalLevels {
            alarm: self.alarm.is_active(),
            gas_detected: hazards.gas_detected,
            over_temperature: hazards.over_temperature,
            incorrect_code: self.disarm.incorrect_code_lit(),
            system_blocked: self.disarm.is_blocked(),
        }
    }

    pub fn alarm(&self) -> &AlarmArbitrator {
        &self.alarm
    }

    pub fn disarm(&self) -> &DisarmController {
        &self.disarm
    }

    pub fn sensors(&self) -> &SensorAggregator {
        &self.sensors
    }

    pub fn events(&self) -> &EventLog {
        self.logger.log()
    }

    pub fn keypad_state(&self) -> KeypadState {
        self.debouncer.state()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
