//! ESP32-C3 GPIO / IO_MUX Driver
//! Direct register access for pin configuration, output and input
//!
//! Each pin has one IO_MUX register (function select, pulls, input enable).
//! Output enable and output level live in GPIO write-1-to-set /
//! write-1-to-clear register pairs, which are only ever written, never
//! read-modify-written.

use crate::config;
use crate::reg::{field_set, Bus};
use crate::soc::gpio::{self as regs, signal, PIN_COUNT};
use crate::soc::io_mux;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Analog pad: no input enable, no output enable, no pulls.
    Analog,
    Input,
    /// Output enable only, pulls are always off.
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    None,
    Up,
    Down,
}

/// IO_MUX function number (MCU_SEL).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Function(u8);

impl Function {
    /// Function 0: the pad's default (analog pads, direct UART0 on 20/21).
    pub const F0: Function = Function(0);
    /// Function 1: plain GPIO through the GPIO matrix.
    pub const GPIO: Function = Function(1);

    pub const fn new(n: u8) -> Self {
        Function(n & 0x7)
    }
}

pub struct Gpio<B> {
    bus: B,
}

impl<B: Bus> Gpio<B> {
    pub fn new(bus: B) -> Self {
        Gpio { bus }
    }

    /// Configure the board's pin plan: LEDs as outputs, potentiometer as an
    /// analog pad, button and echo as digital inputs.
    pub fn init(&mut self) {
        self.configure_pin(config::LED_GPIO, Direction::Output, Pull::None, Function::GPIO);
        self.configure_pin(config::LED2_GPIO, Direction::Output, Pull::None, Function::GPIO);
        self.output_low(config::LED2_GPIO);

        self.configure_pin(config::POT_GPIO, Direction::Analog, Pull::None, Function::F0);

        // Pull-down keeps the button low while it is not pressed
        self.configure_pin(config::BUTTON_GPIO, Direction::Input, Pull::Down, Function::GPIO);
        self.configure_pin(config::ECHO_GPIO, Direction::Input, Pull::None, Function::GPIO);

        log::info!("gpio: pins configured");
    }

    /// Configure a pin's IO_MUX register and output enable.
    ///
    /// The IO_MUX register is updated with a single read-modify-write, so
    /// the pad never sits in a half-configured state. Pins outside
    /// GPIO0..=GPIO21 are ignored.
    pub fn configure_pin(&mut self, pin: u8, direction: Direction, pull: Pull, function: Function) {
        if pin >= PIN_COUNT {
            return;
        }

        self.bus.modify(io_mux::gpio(pin), |v| {
            let mut v = v & !(io_mux::FUN_IE | io_mux::FUN_WPU | io_mux::FUN_WPD);
            v = field_set(v, io_mux::MCU_SEL, function.0 as u32);
            if direction == Direction::Input {
                v |= io_mux::FUN_IE;
                match pull {
                    Pull::Up => v |= io_mux::FUN_WPU,
                    Pull::Down => v |= io_mux::FUN_WPD,
                    Pull::None => {}
                }
            }
            v
        });

        match direction {
            Direction::Output => self.enable_output(pin),
            Direction::Input | Direction::Analog => self.disable_output(pin),
        }
    }

    pub fn enable_output(&mut self, pin: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus.write(regs::ENABLE_W1TS, 1 << pin);
    }

    pub fn disable_output(&mut self, pin: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus.write(regs::ENABLE_W1TC, 1 << pin);
    }

    /// Set GPIO pin high
    pub fn output_high(&mut self, pin: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus.write(regs::OUT_W1TS, 1 << pin);
    }

    /// Set GPIO pin low
    pub fn output_low(&mut self, pin: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus.write(regs::OUT_W1TC, 1 << pin);
    }

    /// Instantaneous input level. No debouncing.
    pub fn read_pin(&self, pin: u8) -> bool {
        if pin >= PIN_COUNT {
            return false;
        }
        (self.bus.read(regs::IN) & (1 << pin)) != 0
    }

    /// Drive `pin` from peripheral output `signal` through the GPIO matrix.
    /// Output enable follows the peripheral, no inversion.
    pub fn connect_output(&mut self, pin: u8, signal: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus.modify(regs::func_out_sel_cfg(pin), |v| {
            let v = v & !(regs::OEN_INV_SEL | regs::OEN_SEL | regs::OUT_INV_SEL);
            field_set(v, regs::OUT_SEL, signal as u32)
        });
    }

    /// Feed peripheral input `signal` from `pin` through the GPIO matrix.
    pub fn connect_input(&mut self, signal: u8, pin: u8) {
        if pin >= PIN_COUNT {
            return;
        }
        self.bus
            .write(regs::func_in_sel_cfg(signal), regs::IN_SEL.bits(pin as u32) | regs::SIG_IN_SEL);
    }

    /// Route LEDC low-speed channel 0 to `pin`.
    pub fn connect_ledc(&mut self, pin: u8) {
        self.connect_output(pin, signal::LEDC_LS_SIG_OUT0);
    }
}
