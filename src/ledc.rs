//! LEDC (PWM) driver: low-speed timer 0 driving channel 0.
//!
//! Timer and channel settings only take effect once their "parameter update"
//! bit is set, and a new duty lands at the next timer period boundary, not
//! when the register is written.

use crate::gpio::Gpio;
use crate::reg::{field_set, Bus};
use crate::soc::{ledc, system};

/// Timer clocking, fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    pub source_hz: u64,
    pub pwm_hz: u64,
    pub resolution_bits: u32,
    /// Fractional bits of the timer clock divider.
    pub frac_bits: u32,
}

impl TimerConfig {
    /// Fixed-point clock divider:
    /// `(source_hz << frac_bits) / (pwm_hz * 2^resolution_bits)`.
    ///
    /// Panics when the quotient is zero or does not fit the 18-bit divider
    /// field. Evaluated in a `const`, that panic is a build error.
    pub const fn divider(&self) -> u32 {
        assert!(self.resolution_bits >= 1 && self.resolution_bits <= 14, "duty resolution out of range");
        assert!(self.pwm_hz > 0, "PWM frequency must be non-zero");
        let num = self.source_hz << self.frac_bits;
        let den = self.pwm_hz * (1u64 << self.resolution_bits);
        let div = num / den;
        assert!(div != 0, "LEDC timer divider is zero");
        assert!(div <= ledc::TIMER_CLK_DIV.max() as u64, "LEDC timer divider exceeds 18 bits");
        div as u32
    }

    pub const fn max_duty(&self) -> u32 {
        (1 << self.resolution_bits) - 1
    }
}

/// A [`TimerConfig`] together with the divider computed from it.
///
/// Only [`ValidTimer::new`] builds one, so the divider programmed into the
/// timer always belongs to the config it travels with. Bound to a `const`,
/// an unusable config fails the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidTimer {
    config: TimerConfig,
    divider: u32,
}

impl ValidTimer {
    pub const fn new(config: TimerConfig) -> Self {
        ValidTimer {
            divider: config.divider(),
            config,
        }
    }

    pub const fn config(&self) -> TimerConfig {
        self.config
    }

    pub const fn divider(&self) -> u32 {
        self.divider
    }

    pub const fn max_duty(&self) -> u32 {
        self.config.max_duty()
    }
}

pub struct Ledc<B> {
    bus: B,
    timer: ValidTimer,
    duty: u32,
}

impl<B: Bus> Ledc<B> {
    pub fn new(bus: B, timer: ValidTimer) -> Self {
        Ledc {
            bus,
            timer,
            duty: 0,
        }
    }

    pub fn max_duty(&self) -> u32 {
        self.timer.max_duty()
    }

    /// Last duty written, after clamping.
    pub fn duty(&self) -> u32 {
        self.duty
    }

    /// Bring up the peripheral, timer 0 and channel 0, and route the channel
    /// to `pin`. Leaves the output at duty 0.
    pub fn init(&mut self, pin: u8) {
        self.bus.set_bits(system::PERIP_CLK_EN0, system::LEDC);
        self.bus.set_bits(system::PERIP_RST_EN0, system::LEDC);
        self.bus.clear_bits(system::PERIP_RST_EN0, system::LEDC);

        // APB clock (80 MHz) feeds the low-speed timers
        self.bus.modify(ledc::CONF, |v| {
            field_set(v | ledc::CLK_EN, ledc::APB_CLK_SEL, ledc::APB_CLK_SEL_APB)
        });

        let divider = self.timer.divider();
        let resolution = self.timer.config().resolution_bits;
        self.bus.modify(ledc::TIMER0_CONF, |v| {
            let mut v = v & !ledc::TIMER_PAUSE;
            v = field_set(v, ledc::TIMER_CLK_DIV, divider);
            field_set(v, ledc::TIMER_DUTY_RES, resolution)
        });
        self.bus.set_bits(ledc::TIMER0_CONF, ledc::TIMER_RST);
        self.bus.clear_bits(ledc::TIMER0_CONF, ledc::TIMER_RST);
        self.bus.set_bits(ledc::TIMER0_CONF, ledc::TIMER_PARA_UP);

        // Channel 0 on timer 0, output enabled, idle low
        self.bus.write(ledc::CH0_HPOINT, 0);
        self.bus.write(ledc::CH0_DUTY, 0);
        self.bus.modify(ledc::CH0_CONF0, |v| {
            let v = v & !(ledc::IDLE_LV | ledc::SIG_OUT_EN);
            field_set(v, ledc::TIMER_SEL, 0) | ledc::SIG_OUT_EN
        });
        self.bus.set_bits(ledc::CH0_CONF0, ledc::CH_PARA_UP);
        self.bus.set_bits(ledc::CH0_CONF1, ledc::DUTY_START);

        Gpio::new(&mut self.bus).connect_ledc(pin);

        self.set_duty(0);

        log::debug!("ledc: timer divider {:#x}", divider);
        log::info!(
            "ledc: {} Hz, {}-bit duty on GPIO{}",
            self.timer.config().pwm_hz,
            resolution,
            pin
        );
    }

    /// Request a new duty. Values above the maximum are clamped. The change
    /// shows on the pin at the next PWM period.
    pub fn set_duty(&mut self, duty: u32) {
        let duty = duty.min(self.max_duty());
        self.bus.write(ledc::CH0_DUTY, duty << ledc::DUTY_FRAC_BITS);
        self.bus.set_bits(ledc::CH0_CONF1, ledc::DUTY_START);
        self.bus.set_bits(ledc::CH0_CONF0, ledc::CH_PARA_UP);
        self.duty = duty;
    }
}
