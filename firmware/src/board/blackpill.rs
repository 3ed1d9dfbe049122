use embassy_stm32::flash::{Blocking, Flash};
use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{TIM3, TIM5};
use embassy_stm32::time::hz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm, SimplePwmChannel};
use thrust::config::THRUSTER_COUNT;
use thrust::hal::EscOutput;

use super::{duty_for_pulse, ESC_PWM_FREQ_HZ};

// Thruster wiring, in thrust::MountPosition order:
// - right        PA0 (TIM5 CH1)
// - front right  PA1 (TIM5 CH2)
// - front left   PA2 (TIM5 CH3)
// - left         PA3 (TIM5 CH4)
// - back left    PB4 (TIM3 CH1)
// - back right   PB5 (TIM3 CH2)

pub type FlashStorage = Flash<'static, Blocking>;

pub struct Board {
    pub escs: [Esc; THRUSTER_COUNT],
    pub flash: FlashStorage,
}

impl Board {
    pub fn init() -> Board {
        let p = embassy_stm32::init(Default::default());

        let tim5 = SimplePwm::new(
            p.TIM5,
            Some(PwmPin::new_ch1(p.PA0, OutputType::PushPull)),
            Some(PwmPin::new_ch2(p.PA1, OutputType::PushPull)),
            Some(PwmPin::new_ch3(p.PA2, OutputType::PushPull)),
            Some(PwmPin::new_ch4(p.PA3, OutputType::PushPull)),
            hz(ESC_PWM_FREQ_HZ),
            CountingMode::EdgeAlignedUp,
        )
        .split();
        let tim3 = SimplePwm::new(
            p.TIM3,
            Some(PwmPin::new_ch1(p.PB4, OutputType::PushPull)),
            Some(PwmPin::new_ch2(p.PB5, OutputType::PushPull)),
            None,
            None,
            hz(ESC_PWM_FREQ_HZ),
            CountingMode::EdgeAlignedUp,
        )
        .split();

        let escs = [
            Esc::Tim5(tim5.ch1),
            Esc::Tim5(tim5.ch2),
            Esc::Tim5(tim5.ch3),
            Esc::Tim5(tim5.ch4),
            Esc::Tim3(tim3.ch1),
            Esc::Tim3(tim3.ch2),
        ];

        Board {
            escs,
            flash: Flash::new_blocking(p.FLASH),
        }
    }
}

/// One ESC signal on a timer channel. The thrusters span two timers.
pub enum Esc {
    Tim5(SimplePwmChannel<'static, TIM5>),
    Tim3(SimplePwmChannel<'static, TIM3>),
}

impl EscOutput for Esc {
    fn attach(&mut self) {
        match self {
            Esc::Tim5(ch) => ch.enable(),
            Esc::Tim3(ch) => ch.enable(),
        }
    }

    fn write_microseconds(&mut self, pulse_us: u16) {
        match self {
            Esc::Tim5(ch) => {
                let duty = duty_for_pulse(pulse_us, ch.max_duty_cycle());
                ch.set_duty_cycle(duty);
            }
            Esc::Tim3(ch) => {
                let duty = duty_for_pulse(pulse_us, ch.max_duty_cycle());
                ch.set_duty_cycle(duty);
            }
        }
    }
}
