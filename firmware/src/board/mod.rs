#[cfg(feature = "blackpill")]
pub use blackpill::*;

#[cfg(feature = "blackpill")]
mod blackpill;

/// Standard ESCs expect a 50 Hz signal.
pub const ESC_PWM_FREQ_HZ: u32 = 50;
pub const ESC_PERIOD_US: u32 = 1_000_000 / ESC_PWM_FREQ_HZ;

/// Timer duty value for a pulse of `pulse_us` at the ESC frequency.
pub fn duty_for_pulse(pulse_us: u16, max_duty: u16) -> u16 {
    let duty = u32::from(pulse_us) * u32::from(max_duty) / ESC_PERIOD_US;
    duty.min(u32::from(max_duty)) as u16
}
