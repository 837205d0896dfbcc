//! Gas / over-temperature alarm controller library.
//!
//! Exposes the pure-logic modules for integration testing and the device
//! binary.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod event_log;
pub mod keypad;
pub mod pins;
pub mod scheduler;
pub mod sensors;

pub mod adapters;
pub mod drivers;

pub use app::service::AlarmService;
pub use config::AlarmConfig;
pub use error::{Error, Result};
