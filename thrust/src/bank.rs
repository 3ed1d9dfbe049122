use embedded_hal::delay::DelayNs;

use crate::channel::ThrusterChannel;
use crate::config::{MountPosition, ThrusterConfig, THRUSTER_COUNT};
use crate::hal::{EscOutput, NvStorage, Registry, SharedVar};
use crate::interlock::Interlocks;
use crate::Error;

/// What bank construction did about ESC calibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Calibration {
    /// The persistent flag was set, the ESCs were left alone.
    AlreadyCalibrated,
    /// The full-then-zero thrust sequence ran during this boot.
    Calibrated,
}

/// All six thrusters of the vehicle.
pub struct ThrusterBank<P, V, N> {
    channels: [ThrusterChannel<P, V>; THRUSTER_COUNT],
    interlocks: Interlocks<V, N>,
    calibration: Calibration,
}

impl<P, V, N> ThrusterBank<P, V, N>
where
    P: EscOutput,
    V: SharedVar + Clone,
    N: NvStorage,
{
    /// Takes the ESC outputs in `MountPosition::ALL` order.
    ///
    /// Runs the ESC calibration sequence if the persistent flag is unset,
    /// which blocks for `arm_delay_ms + settle_delay_ms`.
    pub fn new<R, D>(
        escs: [P; THRUSTER_COUNT],
        registry: &R,
        storage: N,
        config: &ThrusterConfig,
        delay: &mut D,
    ) -> Result<Self, Error>
    where
        R: Registry<Var = V>,
        D: DelayNs,
    {
        let mut interlocks = Interlocks::resolve(registry, storage, config)?;

        let mut channel = |esc: P, position: MountPosition| -> Result<_, Error> {
            let thrust = registry.var(config.thruster_vars[position.index()])?;
            ThrusterChannel::new(esc, thrust, config.pulse, &mut interlocks)
        };

        let [right, front_right, front_left, left, back_left, back_right] = escs;
        let channels = [
            channel(right, MountPosition::Right)?,
            channel(front_right, MountPosition::FrontRight)?,
            channel(front_left, MountPosition::FrontLeft)?,
            channel(left, MountPosition::Left)?,
            channel(back_left, MountPosition::BackLeft)?,
            channel(back_right, MountPosition::BackRight)?,
        ];

        let mut bank = ThrusterBank {
            channels,
            interlocks,
            calibration: Calibration::AlreadyCalibrated,
        };

        if !bank.interlocks.is_calibrated() {
            // Set before running so an interrupted calibration is not retried
            bank.interlocks.set_calibrated(true);
            bank.calibrate(config, delay)?;
            bank.calibration = Calibration::Calibrated;
        }

        Ok(bank)
    }

    fn calibrate<D: DelayNs>(
        &mut self,
        config: &ThrusterConfig,
        delay: &mut D,
    ) -> Result<(), Error> {
        let soft_kill = self.interlocks.soft_kill().clone();
        let last_soft_kill = soft_kill.get_bool();
        soft_kill.set(false);

        info!("Calibrating thrusters...");
        self.command_all(1.0)?;
        delay.delay_ms(config.arm_delay_ms);
        self.command_all(0.0)?;
        delay.delay_ms(config.settle_delay_ms);
        info!("Done calibrating thrusters");

        soft_kill.set(last_soft_kill);
        Ok(())
    }

    fn command_all(&mut self, thrust: f32) -> Result<(), Error> {
        for channel in self.channels.iter_mut() {
            channel.command(&mut self.interlocks, thrust)?;
        }
        Ok(())
    }

    /// Refreshes every thruster from the control bus. Call once per control
    /// cycle.
    pub fn service(&mut self) -> Result<(), Error> {
        for channel in self.channels.iter_mut() {
            channel.service(&mut self.interlocks)?;
        }
        Ok(())
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }
}
