//! Control loop.
//!
//! Boot order: watchdogs off, then GPIO, ADC, PWM and UART, then the
//! startup banner. The ADC is brought up but never sampled here, so nothing
//! between the banner and the first fade step waits on a conversion.
//!
//! After that every iteration reads the button: while it is pressed the LED
//! holds its brightness and an attention line goes out on the UART,
//! otherwise the fade moves one step along its triangle wave.

use crate::adc::Adc;
use crate::config;
use crate::delay;
use crate::fader::Fader;
use crate::gpio::Gpio;
use crate::ledc::Ledc;
use crate::reg::{Bus, Spin};
use crate::uart::Uart;
use crate::wdt;

/// What one loop iteration did, and the duty it applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Held(u32),
    Faded(u32),
}

pub struct App<B> {
    bus: B,
    gpio: Gpio<B>,
    adc: Adc<B>,
    ledc: Ledc<B>,
    uart: Uart<B>,
    fader: Fader,
}

impl<B: Bus + Clone> App<B> {
    pub fn new(bus: B) -> Self {
        App {
            gpio: Gpio::new(bus.clone()),
            adc: Adc::new(
                bus.clone(),
                config::ADC_CHANNEL,
                config::ADC_ATTEN,
                config::ADC_SAR_CLK_DIV,
            ),
            ledc: Ledc::new(bus.clone(), config::PWM_TIMER),
            uart: Uart::new_uart0(bus.clone()),
            fader: Fader::new(config::PWM_TIMER.max_duty()),
            bus,
        }
    }

    /// Bound every hardware poll. Only meant for simulated registers.
    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.adc = self.adc.with_spin(spin);
        self.uart = self.uart.with_spin(spin);
        self
    }

    pub fn fader(&self) -> &Fader {
        &self.fader
    }

    pub fn init(&mut self) {
        wdt::disable_all(&mut self.bus);

        self.gpio.init();
        self.adc.init();
        self.ledc.init(config::LED_GPIO);
        self.uart.init(
            config::UART_SOURCE_HZ,
            config::UART_BAUD,
            config::UART0_TX_GPIO,
            config::UART0_RX_GPIO,
        );

        self.uart.put_string(config::STARTUP_MESSAGE);
    }

    /// One pass of the superloop, without the trailing delay.
    pub fn step(&mut self) -> Tick {
        let duty = self.fader.duty();
        self.ledc.set_duty(duty);

        if self.gpio.read_pin(config::BUTTON_GPIO) {
            self.uart.put_string(config::ATTENTION_MESSAGE);
            Tick::Held(duty)
        } else {
            self.fader.advance();
            Tick::Faded(duty)
        }
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
            delay::spin(config::LOOP_DELAY_SPINS);
        }
    }
}
