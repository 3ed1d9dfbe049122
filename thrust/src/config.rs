use libm::roundf;

pub const MIN_THRUSTER_PULSE: u16 = 1100;
pub const MAX_THRUSTER_PULSE: u16 = 1900;

/// ESCs need the full-thrust input held this long to power on and register it.
pub const ARM_DELAY_MS: u32 = 2500;
/// Hold time for the zero-thrust edge that completes range learning.
pub const SETTLE_DELAY_MS: u32 = 500;

pub const CALIBRATED_ADDRESS: u16 = 0;

pub const SOFT_KILL_VAR: &str = "switches.softKill";
pub const CALIBRATE_VAR: &str = "switches.calibrate";

pub const THRUSTER_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    pub min_us: u16,
    pub max_us: u16,
}

impl PulseRange {
    pub const fn new(min_us: u16, max_us: u16) -> Self {
        PulseRange { min_us, max_us }
    }

    /// Maps a thrust fraction onto the pulse range. Input is clamped to
    /// [0.0, 1.0] first; NaN counts as no thrust.
    pub fn pulse_for(&self, thrust: f32) -> u16 {
        // max() discards NaN, so NaN gives no thrust rather than full thrust
        let clamped = thrust.max(0.0).min(1.0);
        let min = f32::from(self.min_us);
        let max = f32::from(self.max_us);
        roundf(min + (max - min) * clamped) as u16
    }
}

impl Default for PulseRange {
    fn default() -> Self {
        PulseRange::new(MIN_THRUSTER_PULSE, MAX_THRUSTER_PULSE)
    }
}

/// Physical mount positions, in wiring order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MountPosition {
    Right,
    FrontRight,
    FrontLeft,
    Left,
    BackLeft,
    BackRight,
}

impl MountPosition {
    pub const ALL: [MountPosition; THRUSTER_COUNT] = [
        MountPosition::Right,
        MountPosition::FrontRight,
        MountPosition::FrontLeft,
        MountPosition::Left,
        MountPosition::BackLeft,
        MountPosition::BackRight,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Default control bus name of the commanded thrust for this position.
    pub const fn var_name(&self) -> &'static str {
        match self {
            MountPosition::Right => "thrusters.right",
            MountPosition::FrontRight => "thrusters.frontRight",
            MountPosition::FrontLeft => "thrusters.frontLeft",
            MountPosition::Left => "thrusters.left",
            MountPosition::BackLeft => "thrusters.backLeft",
            MountPosition::BackRight => "thrusters.backRight",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThrusterConfig {
    pub pulse: PulseRange,
    pub arm_delay_ms: u32,
    pub settle_delay_ms: u32,
    pub calibrated_address: u16,
    pub soft_kill_var: &'static str,
    pub calibrate_var: &'static str,
    /// Indexed by `MountPosition::index()`.
    pub thruster_vars: [&'static str; THRUSTER_COUNT],
}

impl Default for ThrusterConfig {
    fn default() -> Self {
        ThrusterConfig {
            pulse: PulseRange::default(),
            arm_delay_ms: ARM_DELAY_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            calibrated_address: CALIBRATED_ADDRESS,
            soft_kill_var: SOFT_KILL_VAR,
            calibrate_var: CALIBRATE_VAR,
            thruster_vars: MountPosition::ALL.map(|p| p.var_name()),
        }
    }
}
