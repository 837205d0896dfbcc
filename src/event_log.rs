//! Edge-triggered event log.
//!
//! Five boolean channels are compared against their previous value every
//! tick.  Each change is stored as `{timestamp, "<NAME>_<ON|OFF>"}` in a
//! fixed ring and mirrored to the console as
//! `YYYY-MM-DD HH:MM:SS  <label>`.
//!
//! The ring overwrites the oldest slot once full.  The write index wraps
//! with it, so [`EventLog::dump_view`] (slots `0..write_index`) only shows
//! entries written since the last wrap.

use core::fmt::Write;

use log::debug;

use crate::app::ports::{ClockPort, SerialPort};
use crate::clock::format_timestamp;
use crate::config::{EVENT_LABEL_LEN, EVENT_LOG_CAPACITY};
use crate::error::SerialError;

pub type EventLabel = heapless::String<EVENT_LABEL_LEN>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Epoch seconds.
    pub timestamp: i64,
    pub label: EventLabel,
}

// ---------------------------------------------------------------------------
// Ring storage
// ---------------------------------------------------------------------------

pub struct EventLog {
    slots: heapless::Vec<EventRecord, EVENT_LOG_CAPACITY>,
    write_index: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
            write_index: 0,
        }
    }

    /// Append, overwriting the oldest slot when full.
    pub fn append(&mut self, record: EventRecord) {
        match self.slots.get_mut(self.write_index) {
            Some(slot) => *slot = record,
            // Not yet full: write_index == len < capacity.
            None => {
                let _ = self.slots.push(record);
            }
        }
        self.write_index = (self.write_index + 1) % EVENT_LOG_CAPACITY;
    }

    /// Slots `0..write_index` in slot order.
    pub fn dump_view(&self) -> &[EventRecord] {
        &self.slots[..self.write_index]
    }

    /// Every stored slot in slot order, including entries from before a wrap.
    pub fn slots(&self) -> &[EventRecord] {
        &self.slots
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Edge detector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Alarm,
    GasDetected,
    OverTemperature,
    IncorrectCode,
    SystemBlocked,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Alarm,
        Signal::GasDetected,
        Signal::OverTemperature,
        Signal::IncorrectCode,
        Signal::SystemBlocked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::Alarm => "ALARM",
            Signal::GasDetected => "GAS_DET",
            Signal::OverTemperature => "OVER_TEMP",
            Signal::IncorrectCode => "LED_IC",
            Signal::SystemBlocked => "LED_SB",
        }
    }

    pub fn label(self, on: bool) -> EventLabel {
        let mut label = EventLabel::new();
        // Longest label is "OVER_TEMP_OFF" (13 bytes), which fits.
        let _ = write!(label, "{}_{}", self.name(), if on { "ON" } else { "OFF" });
        label
    }
}

/// Current level of every logged channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalLevels {
    pub alarm: bool,
    pub gas_detected: bool,
    pub over_temperature: bool,
    pub incorrect_code: bool,
    pub system_blocked: bool,
}

impl SignalLevels {
    pub fn level(&self, signal: Signal) -> bool {
        match signal {
            Signal::Alarm => self.alarm,
            Signal::GasDetected => self.gas_detected,
            Signal::OverTemperature => self.over_temperature,
            Signal::IncorrectCode => self.incorrect_code,
            Signal::SystemBlocked => self.system_blocked,
        }
    }
}

pub struct EventLogger {
    log: EventLog,
    last: SignalLevels,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger {
    /// All channels start low.
    pub fn new() -> Self {
        Self {
            log: EventLog::new(),
            last: SignalLevels::default(),
        }
    }

    /// Record every channel that changed since the previous call.
    ///
    /// Records are always stored; a failed console write is reported after
    /// all channels have been processed.
    pub fn update(
        &mut self,
        levels: &SignalLevels,
        clock: &impl ClockPort,
        serial: &mut impl SerialPort,
    ) -> Result<(), SerialError> {
        let mut result = Ok(());
        for signal in Signal::ALL {
            let now = levels.level(signal);
            if now == self.last.level(signal) {
                continue;
            }
            let record = EventRecord {
                timestamp: clock.now(),
                label: signal.label(now),
            };
            debug!("event: {}", record.label);
            let mirrored = write!(
                serial,
                "{}  {}\r\n",
                format_timestamp(record.timestamp),
                record.label
            );
            result = result.and(mirrored);
            self.log.append(record);
        }
        self.last = *levels;
        result
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}
