//! Application core — pure domain orchestration, zero direct I/O.
//!
//! [`service::AlarmService`] wires the keypad debouncer, sensor
//! aggregator, alarm arbitrator, disarm controller, console and event
//! logger together.  All interaction with hardware happens through
//! **port traits** defined in [`ports`].

pub mod ports;
pub mod service;
pub mod setup;
