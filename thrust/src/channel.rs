use crate::config::PulseRange;
use crate::hal::{EscOutput, NvStorage, SharedVar};
use crate::interlock::Interlocks;
use crate::Error;

/// One ESC plus the control bus value it follows.
pub struct ThrusterChannel<P, V> {
    esc: P,
    thrust: V,
    pulse: PulseRange,
}

impl<P, V> ThrusterChannel<P, V>
where
    P: EscOutput,
    V: SharedVar,
{
    /// Attaches the output and parks it at zero thrust, so the ESC never sees
    /// an undefined pulse before the first command.
    ///
    /// Parking goes through the switches, so a pending calibration request
    /// fails here before any pulse is written.
    pub fn new<N: NvStorage>(
        mut esc: P,
        thrust: V,
        pulse: PulseRange,
        interlocks: &mut Interlocks<V, N>,
    ) -> Result<Self, Error> {
        esc.attach();
        let mut channel = ThrusterChannel { esc, thrust, pulse };
        channel.command(interlocks, 0.0)?;
        Ok(channel)
    }

    /// Applies the current value of the bound control bus variable.
    pub fn service<N: NvStorage>(
        &mut self,
        interlocks: &mut Interlocks<V, N>,
    ) -> Result<(), Error> {
        let thrust = self.thrust.get_float();
        self.command(interlocks, thrust)
    }

    pub fn command<N: NvStorage>(
        &mut self,
        interlocks: &mut Interlocks<V, N>,
        thrust: f32,
    ) -> Result<(), Error> {
        let thrust = interlocks.gate(thrust)?;
        self.command_unchecked(thrust);
        Ok(())
    }

    /// Writes the pulse for `thrust` without consulting any switch.
    pub fn command_unchecked(&mut self, thrust: f32) {
        self.esc.write_microseconds(self.pulse.pulse_for(thrust));
    }
}
