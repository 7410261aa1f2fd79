//! SAR ADC1 one-shot driver.
//!
//! A conversion goes through `Idle → Armed → Converting → Done → Idle`:
//! the start bit is written low, then high (the hardware triggers on the
//! rising edge), the ADC1 done flag is polled, the data register is read and
//! the flag is cleared. `&mut self` keeps one conversion in flight at a time.

use crate::delay;
use crate::reg::{field_get, field_set, Bus, Spin};
use crate::soc::{saradc, system};

/// Input attenuation. Sets the full-scale voltage of the conversion, the
/// voltage-to-count mapping itself is an analog property of the chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Attenuation {
    Db0 = 0,
    Db2_5 = 1,
    Db6 = 2,
    Db11 = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Armed,
    Converting,
    Done,
}

/// Largest value a one-shot conversion returns (12 bits).
pub const MAX_READING: u16 = 0x0FFF;

/// Loop turns the start bit is held low before the rising edge.
const START_LOW_SPINS: u32 = 32;

pub struct Adc<B> {
    bus: B,
    channel: u8,
    atten: Attenuation,
    sar_clk_div: u32,
    spin: Spin,
    state: State,
}

impl<B: Bus> Adc<B> {
    pub fn new(bus: B, channel: u8, atten: Attenuation, sar_clk_div: u32) -> Self {
        Adc {
            bus,
            channel,
            atten,
            sar_clk_div,
            spin: Spin::Forever,
            state: State::Idle,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn init(&mut self) {
        // Clock on, then pulse the peripheral reset
        self.bus.set_bits(system::PERIP_CLK_EN0, system::APB_SARADC);
        self.bus.set_bits(system::PERIP_RST_EN0, system::APB_SARADC);
        self.bus.clear_bits(system::PERIP_RST_EN0, system::APB_SARADC);

        // Force the SAR on, ungate its clock, software start left low
        let sar_clk_div = self.sar_clk_div;
        self.bus.modify(saradc::CTRL, |v| {
            let mut v = v | saradc::SAR_CLK_GATED;
            v = field_set(v, saradc::XPD_SAR_FORCE, 3);
            v = field_set(v, saradc::SAR_CLK_DIV, sar_clk_div);
            v & !(saradc::START_FORCE | saradc::START)
        });

        let channel = self.channel as u32;
        let atten = self.atten as u32;
        self.bus.modify(saradc::ONETIME_SAMPLE, |v| {
            let mut v = v | saradc::ADC1_ONETIME_SAMPLE;
            v = field_set(v, saradc::ONETIME_CHANNEL, channel);
            v = field_set(v, saradc::ONETIME_ATTEN, atten);
            v & !saradc::ONETIME_START
        });

        self.bus.set_bits(saradc::INT_ENA, saradc::ADC1_DONE);
        self.bus.write(saradc::INT_CLR, saradc::ADC1_DONE);
        self.state = State::Idle;

        log::info!(
            "adc: ADC1 channel {} attenuation {:?}",
            self.channel,
            self.atten
        );
    }

    /// Run one conversion and return its 12-bit result.
    ///
    /// Blocks until the done flag asserts. If the hardware never signals
    /// completion this never returns.
    pub fn sample_once(&mut self) -> u16 {
        let sample = self.bus.read(saradc::ONETIME_SAMPLE) & !saradc::ONETIME_START;
        self.bus.write(saradc::ONETIME_SAMPLE, sample);
        self.state = State::Armed;

        delay::spin(START_LOW_SPINS);

        self.bus.write(saradc::ONETIME_SAMPLE, sample | saradc::ONETIME_START);
        self.state = State::Converting;

        let bus = &self.bus;
        if !self.spin.wait(|| bus.read(saradc::INT_ST) & saradc::ADC1_DONE != 0) {
            log::warn!("adc: done flag never asserted");
        }
        self.state = State::Done;

        let raw = field_get(self.bus.read(saradc::ADC1_DATA_STATUS), saradc::ADC1_DATA);
        self.bus.write(saradc::INT_CLR, saradc::ADC1_DONE);
        self.state = State::Idle;

        (raw & MAX_READING as u32) as u16
    }
}
