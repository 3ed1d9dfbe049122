//! Contracts the thruster driver consumes. Implemented by the board support
//! code on hardware and by in-memory fakes in tests.

use crate::Error;

/// Handle to one named value on the vehicle-wide control bus.
///
/// The handle does not own the value. Other subsystems read and write the
/// same cell, so reads may be stale but must never be torn.
pub trait SharedVar {
    fn get_float(&self) -> f32;
    fn get_bool(&self) -> bool;
    fn set(&self, value: bool);
}

/// Resolves control bus names to handles.
pub trait Registry {
    type Var: SharedVar + Clone;

    fn var(&self, name: &'static str) -> Result<Self::Var, Error>;
}

/// Non-volatile boolean cells that survive power loss.
pub trait NvStorage {
    fn read(&mut self, address: u16) -> bool;
    fn write(&mut self, address: u16, value: bool);
}

/// One ESC signal output.
pub trait EscOutput {
    /// Starts emitting the PWM signal. Called once before the first pulse.
    fn attach(&mut self);
    fn write_microseconds(&mut self, pulse_us: u16);
}
