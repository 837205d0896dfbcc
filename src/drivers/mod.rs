//! Peripheral initialisation and thin pin-level drivers.

pub mod gpio;
pub mod hw_init;
pub mod siren;
