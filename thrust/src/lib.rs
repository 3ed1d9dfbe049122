#![cfg_attr(not(test), no_std)]

//! Thruster driver: turns per-thruster thrust fractions from the control bus
//! into ESC pulses, behind the soft kill and calibration request switches,
//! and runs the ESC calibration sequence once per calibration flag reset.

// must come first so the macros are visible in the other modules
mod fmt;

pub mod bank;
pub mod channel;
pub mod config;
pub mod hal;
pub mod interlock;

#[cfg(test)]
mod mock;

pub use bank::{Calibration, ThrusterBank};
pub use channel::ThrusterChannel;
pub use config::{MountPosition, PulseRange, ThrusterConfig};

#[derive(thiserror_no_std::Error, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Recalibration was requested while the thrusters were live. The
    /// calibration flag has been cleared; the caller must halt so the next
    /// boot runs the calibration sequence.
    #[error("calibration requested, shutting down")]
    CalibrationRequested,

    #[error("unknown control variable {0}")]
    UnknownVariable(&'static str),
}
