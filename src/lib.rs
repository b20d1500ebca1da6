//! Small device drivers: a digital wake-source input, a Wi-Fi auto-reconnect
//! wrapper and the VL6180 time-of-flight / ambient light sensor.

#![cfg_attr(not(test), no_std)]
// #![deny(missing_debug_implementations)]
#![allow(missing_docs)]
#![deny(warnings)]
#![deny(missing_copy_implementations)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]

/// Errors in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE, PinE = ()> {
    /// Communication error with the bus or platform service
    Comm(CommE),
    /// Pin setting error
    Pin(PinE),
    /// The model ID read from the device was not the expected one
    InvalidModelId(u8),
    /// A configuration field was out of its legal range
    InvalidConfig(ConfigField),
    /// Only the `"number"` format is supported
    InvalidFormat,
    /// The device never signalled a ready sample
    Timeout,
    /// The resource has already been released
    Closed,
}

extern crate embedded_hal as hal;

pub use crate::connection::{Connection, ConnectionState, RECONNECT_DELAY_MS};
pub use crate::digital::{SleepControl, WakeConfig, WakeLevel, WakeableDigital};
pub use crate::vl6180::{ConfigField, Vl6180};

pub mod connection;
pub mod digital;
pub mod interface;
pub mod vl6180;
pub mod wifi;

#[cfg(test)]
mod tests;
