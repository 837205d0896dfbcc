//! Serial console command processor.
//!
//! One command byte per tick at most.  Commands that take further input
//! (`4`, `5`, `s`) read it with blocking reads inside the handler, which
//! stalls the loop until the operator finishes typing.
//!
//! | Cmd     | Action                                         |
//! |---------|------------------------------------------------|
//! | `1`     | alarm state                                    |
//! | `2`     | gas detector state                             |
//! | `3`     | over-temperature detector state                |
//! | `4`     | enter the disarm code                          |
//! | `5`     | enter a new code (read and discarded)          |
//! | `c`/`C` | temperature in Celsius                         |
//! | `f`/`F` | temperature in Fahrenheit                      |
//! | `s`/`S` | set date and time                              |
//! | `t`/`T` | show date and time                             |
//! | `e`/`E` | dump stored events                             |
//! | other   | help listing                                   |

use log::{debug, info, warn};

use crate::alarm::AlarmArbitrator;
use crate::alarm::code::{DisarmController, DisarmOutcome};
use crate::app::ports::{ClockPort, SerialPort};
use crate::clock::{CivilTime, format_ctime, parse_leading_digits};
use crate::config::CODE_LENGTH;
use crate::error::SerialError;
use crate::event_log::EventLog;
use crate::sensors::SensorAggregator;
use crate::sensors::temperature::celsius_to_fahrenheit;

const HELP: [&str; 11] = [
    "Available commands:\r\n",
    "Press '1' to get the alarm state\r\n",
    "Press '2' to get the gas detector state\r\n",
    "Press '3' to get the over temperature detector state\r\n",
    "Press '4' to enter the code sequence\r\n",
    "Press '5' to enter a new code\r\n",
    "Press 'f' or 'F' to get lm35 reading in Fahrenheit\r\n",
    "Press 'c' or 'C' to get lm35 reading in Celsius\r\n",
    "Press 's' or 'S' to set the date and time\r\n",
    "Press 't' or 'T' to get the date and time\r\n",
    "Press 'e' or 'E' to get the stored events\r\n\r\n",
];

/// Prompt text and digit count for each date/time field, in entry order.
const DATE_FIELDS: [(&str, usize); 6] = [
    ("\r\nType four digits for the current year (YYYY): ", 4),
    ("Type two digits for the current month (01-12): ", 2),
    ("Type two digits for the current day (01-31): ", 2),
    ("Type two digits for the current hour (00-23): ", 2),
    ("Type two digits for the current minutes (00-59): ", 2),
    ("Type two digits for the current seconds (00-59): ", 2),
];

/// Components a console command may read or act on.
pub struct ConsoleContext<'a> {
    pub alarm: &'a mut AlarmArbitrator,
    pub disarm: &'a mut DisarmController,
    pub sensors: &'a SensorAggregator,
    pub events: &'a EventLog,
}

/// Handle one pending command byte, if any.  Returns the byte handled.
pub fn poll(
    ctx: &mut ConsoleContext<'_>,
    serial: &mut impl SerialPort,
    clock: &mut impl ClockPort,
) -> Result<Option<u8>, SerialError> {
    if !serial.readable() {
        return Ok(None);
    }
    let cmd = serial.read_byte()?;
    execute(cmd, ctx, serial, clock)?;
    Ok(Some(cmd))
}

pub fn execute(
    cmd: u8,
    ctx: &mut ConsoleContext<'_>,
    serial: &mut impl SerialPort,
    clock: &mut impl ClockPort,
) -> Result<(), SerialError> {
    debug!("console: command 0x{:02x}", cmd);
    match cmd {
        b'1' => serial.write_str(if ctx.alarm.is_active() {
            "The alarm is activated\r\n"
        } else {
            "The alarm is not activated\r\n"
        }),
        b'2' => serial.write_str(if ctx.sensors.is_gas_detected() {
            "Gas is being detected\r\n"
        } else {
            "Gas is not being detected\r\n"
        }),
        b'3' => serial.write_str(if ctx.sensors.is_over_temperature() {
            "Temperature is above the maximum level\r\n"
        } else {
            "Temperature is below the maximum level\r\n"
        }),
        b'4' => enter_code(ctx, serial),
        b'5' => enter_new_code(serial),
        b'c' | b'C' => write!(
            serial,
            "Temperature: {:.2} \u{b0} C\r\n",
            ctx.sensors.current_temperature_c()
        ),
        b'f' | b'F' => write!(
            serial,
            "Temperature: {:.2} \u{b0} F\r\n",
            celsius_to_fahrenheit(ctx.sensors.current_temperature_c())
        ),
        b's' | b'S' => set_date_time(serial, clock),
        b't' | b'T' => write!(serial, "Date and Time = {}\r\n", format_ctime(clock.now())),
        b'e' | b'E' => dump_events(ctx.events, serial),
        _ => help(serial),
    }
}

pub fn help(serial: &mut impl SerialPort) -> Result<(), SerialError> {
    for line in HELP {
        serial.write_str(line)?;
    }
    Ok(())
}

/// Read exactly N characters, echoing `*` for each.
fn read_masked(serial: &mut impl SerialPort) -> Result<[u8; CODE_LENGTH], SerialError> {
    let mut code = [0u8; CODE_LENGTH];
    for slot in code.iter_mut() {
        *slot = serial.read_byte()?;
        serial.write_str("*")?;
    }
    Ok(code)
}

fn enter_code(ctx: &mut ConsoleContext<'_>, serial: &mut impl SerialPort) -> Result<(), SerialError> {
    serial.write_str("Please enter the three digits numeric code to deactivate the alarm: ")?;
    let code = read_masked(serial)?;
    // The characters are consumed either way so none run as commands.
    if ctx.disarm.is_blocked() {
        return serial.write_str("\r\nThe system is blocked\r\n");
    }
    match ctx.disarm.check_console_code(&code) {
        DisarmOutcome::Accepted => {
            ctx.alarm.deactivate();
            serial.write_str("\r\nThe code is correct\r\n\r\n")
        }
        _ => serial.write_str("\r\nThe code is incorrect\r\n\r\n"),
    }
}

/// The entered characters are consumed but the active code is left as is.
fn enter_new_code(serial: &mut impl SerialPort) -> Result<(), SerialError> {
    serial.write_str("Please enter the new three digits numeric code to deactivate the alarm: ")?;
    read_masked(serial)?;
    warn!("console: new code entered but not stored");
    serial.write_str("\r\nNew code generated\r\n\r\n")
}

fn set_date_time(serial: &mut impl SerialPort, clock: &mut impl ClockPort) -> Result<(), SerialError> {
    let mut values = [0i32; DATE_FIELDS.len()];
    for (value, (prompt, width)) in values.iter_mut().zip(DATE_FIELDS) {
        serial.write_str(prompt)?;
        let mut field = [0u8; 4];
        for slot in field.iter_mut().take(width) {
            *slot = serial.read_byte()?;
            serial.write_bytes(core::slice::from_ref(slot))?;
        }
        *value = parse_leading_digits(&field[..width]);
        serial.write_str("\r\n")?;
    }

    let [year, month, day, hour, minute, second] = values;
    let civil = CivilTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    };
    match civil.to_epoch() {
        Some(epoch) => {
            clock.set(epoch);
            info!("console: clock set to {}", epoch);
        }
        None => warn!("console: {:?} is out of range, clock unchanged", civil),
    }
    serial.write_str("Date and time has been set\r\n")
}

fn dump_events(events: &EventLog, serial: &mut impl SerialPort) -> Result<(), SerialError> {
    for record in events.dump_view() {
        write!(serial, "Event = {}\r\n", record.label)?;
        write!(serial, "Date and Time = {}\r\n", format_ctime(record.timestamp))?;
        serial.write_str("\r\n")?;
    }
    Ok(())
}
