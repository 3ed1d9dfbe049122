use crate::config::ThrusterConfig;
use crate::hal::{NvStorage, Registry, SharedVar};
use crate::Error;

/// The two safety switches every thrust command passes through, plus the
/// persistent calibration flag the calibration switch clears.
pub struct Interlocks<V, N> {
    soft_kill: V,
    calibrate: V,
    storage: N,
    calibrated_address: u16,
}

impl<V, N> Interlocks<V, N>
where
    V: SharedVar,
    N: NvStorage,
{
    pub fn resolve<R>(registry: &R, storage: N, config: &ThrusterConfig) -> Result<Self, Error>
    where
        R: Registry<Var = V>,
    {
        Ok(Interlocks {
            soft_kill: registry.var(config.soft_kill_var)?,
            calibrate: registry.var(config.calibrate_var)?,
            storage,
            calibrated_address: config.calibrated_address,
        })
    }

    /// Returns the thrust that may actually be applied.
    ///
    /// A pending calibration request clears the calibration flag and fails;
    /// the caller has to halt so the next boot recalibrates.
    pub fn gate(&mut self, thrust: f32) -> Result<f32, Error> {
        if self.calibrate.get_bool() {
            self.set_calibrated(false);
            error!("Shutting down to calibrate");
            return Err(Error::CalibrationRequested);
        }

        if self.soft_kill.get_bool() {
            Ok(0.0)
        } else {
            Ok(thrust)
        }
    }

    pub fn soft_kill(&self) -> &V {
        &self.soft_kill
    }

    pub fn is_calibrated(&mut self) -> bool {
        self.storage.read(self.calibrated_address)
    }

    pub fn set_calibrated(&mut self, calibrated: bool) {
        self.storage.write(self.calibrated_address, calibrated);
    }
}
