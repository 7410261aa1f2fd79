//! ESP32-C3 UART transmitter (polled).
//!
//! How It Works:
//! -------------
//! 1. Software writes bytes into the 128-byte TX FIFO through the FIFO register
//! 2. The UART core drains the FIFO onto the TX pin at the baud-rate clock
//! 3. Before each write the driver reads STATUS.TXFIFO_CNT and waits while
//!    the FIFO is full, so no byte is ever overwritten or dropped
//!
//! The line format is the hardware default, 8 data bits, no parity, 1 stop
//! bit. Nothing is appended to the strings written: callers supply their
//! own `\r\n`.

use core::fmt;

use crate::gpio::{Direction, Function, Gpio, Pull};
use crate::reg::{field_get, field_set, Bus, Spin};
use crate::soc::gpio::signal;
use crate::soc::{system, uart};

/// CLKDIV contents for `baud` from a `source_hz` core clock: integer part and
/// 4-bit fraction of `source_hz / baud`, rounded to the nearest 1/16.
pub const fn clock_divider(source_hz: u32, baud: u32) -> (u32, u32) {
    let div = (((source_hz as u64) << 4) + (baud as u64 / 2)) / baud as u64;
    ((div >> 4) as u32, (div & 0xF) as u32)
}

pub struct Uart<B> {
    bus: B,
    base: u32,
    spin: Spin,
}

impl<B: Bus> Uart<B> {
    pub fn new_uart0(bus: B) -> Self {
        Uart {
            bus,
            base: uart::UART0_BASE,
            spin: Spin::Forever,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    /// Clock and reset UART0, program the baud divisor from the XTAL clock
    /// and route TX/RX through the GPIO matrix.
    pub fn init(&mut self, source_hz: u32, baud: u32, tx_pin: u8, rx_pin: u8) {
        self.bus.set_bits(system::PERIP_CLK_EN0, system::UART0);
        self.bus.set_bits(system::PERIP_RST_EN0, system::UART0);
        self.bus.clear_bits(system::PERIP_RST_EN0, system::UART0);

        // Core clock straight from XTAL, no pre-divider
        self.bus.modify(self.base + uart::CLK_CONF, |v| {
            let mut v = field_set(v, uart::SCLK_SEL, uart::SCLK_SEL_XTAL);
            v = field_set(v, uart::SCLK_DIV_NUM, 0);
            v = field_set(v, uart::SCLK_DIV_A, 0);
            v = field_set(v, uart::SCLK_DIV_B, 0);
            v | uart::SCLK_EN | uart::TX_SCLK_EN | uart::RX_SCLK_EN
        });

        let (int, frag) = clock_divider(source_hz, baud);
        self.bus.write(
            self.base + uart::CLKDIV,
            uart::CLKDIV_INT.bits(int) | uart::CLKDIV_FRAG.bits(frag),
        );
        self.sync_regs();

        let mut gpio = Gpio::new(&mut self.bus);
        gpio.connect_output(tx_pin, signal::U0TXD_OUT);
        gpio.configure_pin(tx_pin, Direction::Output, Pull::None, Function::GPIO);
        gpio.connect_input(signal::U0RXD_IN, rx_pin);
        gpio.configure_pin(rx_pin, Direction::Input, Pull::None, Function::GPIO);

        log::debug!("uart: clkdiv {}.{}/16", int, frag);
        log::info!("uart: {} baud, TX GPIO{} RX GPIO{}", baud, tx_pin, rx_pin);
    }

    /// Hand CLK_CONF/CLKDIV over to the UART core and wait for the hardware
    /// to acknowledge. Until then the core keeps running on the old divisor.
    fn sync_regs(&mut self) {
        let id = self.base + uart::ID;
        self.bus.set_bits(id, uart::REG_UPDATE);

        let bus = &self.bus;
        if !self.spin.wait(|| bus.read(id) & uart::REG_UPDATE == 0) {
            log::warn!("uart: register update never acknowledged");
        }
    }

    /// Write one byte, waiting while the TX FIFO is full.
    pub fn put_char(&mut self, c: u8) {
        let status = self.base + uart::STATUS;
        let bus = &self.bus;
        if !self
            .spin
            .wait(|| field_get(bus.read(status), uart::TXFIFO_CNT) < uart::FIFO_SIZE)
        {
            log::warn!("uart: TX FIFO stayed full, byte dropped");
            return;
        }
        self.bus.write(self.base + uart::FIFO, c as u32);
    }

    /// Write every byte of `s`, in order. No terminator is added.
    pub fn put_string(&mut self, s: &str) {
        for b in s.bytes() {
            self.put_char(b);
        }
    }
}

impl<B: Bus> fmt::Write for Uart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_string(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Access, SimBus};
    use crate::soc::{gpio, io_mux};

    const FIFO: u32 = uart::UART0_BASE + uart::FIFO;
    const STATUS: u32 = uart::UART0_BASE + uart::STATUS;
    const ID: u32 = uart::UART0_BASE + uart::ID;
    const CLKDIV: u32 = uart::UART0_BASE + uart::CLKDIV;

    // TXD level and RX count set too: only TXFIFO_CNT may gate the writes
    fn fifo_count(n: u32) -> u32 {
        uart::TXFIFO_CNT.bits(n) | 1 << 31 | 0xFF
    }

    #[test]
    fn divider_for_115200_from_xtal() {
        // 40 MHz / 115200 = 347.22 -> 347 + 4/16
        assert_eq!(clock_divider(40_000_000, 115_200), (347, 4));
        assert_eq!(clock_divider(80_000_000, 115_200), (694, 7));
    }

    #[test]
    fn put_string_writes_each_byte_in_order() {
        let sim = SimBus::new();
        let mut tx = Uart::new_uart0(sim.clone()).with_spin(Spin::AtMost(100));

        tx.put_string("AB");

        assert_eq!(sim.writes_to(FIFO), vec![b'A' as u32, b'B' as u32]);
        assert_eq!(sim.writes().len(), 2);
    }

    #[test]
    fn waits_for_room_in_the_fifo() {
        let sim = SimBus::new();
        let mut tx = Uart::new_uart0(sim.clone()).with_spin(Spin::AtMost(100));
        // 'A' sees a full FIFO twice, 'B' sees it full once more
        sim.script(
            STATUS,
            &[fifo_count(128), fifo_count(200), fifo_count(127), fifo_count(128), fifo_count(3)],
        );

        tx.put_string("AB");

        let mut full = false;
        let mut written = Vec::new();
        for access in sim.log() {
            match access {
                Access::Read(STATUS, v) => full = field_get(v, uart::TXFIFO_CNT) >= 128,
                Access::Write(FIFO, v) => {
                    assert!(!full, "FIFO written while full");
                    written.push(v as u8);
                }
                _ => {}
            }
        }
        assert_eq!(written, b"AB");
        assert_eq!(sim.reads_of(STATUS), 5);
    }

    #[test]
    fn full_fifo_never_gets_written() {
        let sim = SimBus::new();
        sim.preset(STATUS, fifo_count(128));
        let mut tx = Uart::new_uart0(sim.clone()).with_spin(Spin::AtMost(20));

        tx.put_char(b'x');

        assert!(sim.writes_to(FIFO).is_empty());
        assert_eq!(sim.reads_of(STATUS), 20);
    }

    #[test]
    fn no_terminator_added() {
        let sim = SimBus::new();
        let mut tx = Uart::new_uart0(sim.clone());

        tx.put_string("ok\r\n");
        tx.put_string("");

        assert_eq!(sim.writes_to(FIFO), vec![b'o' as u32, b'k' as u32, 13, 10]);
    }

    #[test]
    fn formatted_output() {
        use core::fmt::Write;

        let sim = SimBus::new();
        let mut tx = Uart::new_uart0(sim.clone());

        write!(tx, "duty={}\r\n", 42).unwrap();

        let bytes: Vec<u8> = sim.writes_to(FIFO).into_iter().map(|v| v as u8).collect();
        assert_eq!(bytes, b"duty=42\r\n");
    }

    #[test]
    fn init_sequence() {
        let sim = SimBus::new();
        sim.preset(uart::UART0_BASE + uart::CLK_CONF, 0x0370_1000);
        // Chip version bits in ID survive the update request
        sim.script(ID, &[0x500, uart::REG_UPDATE | 0x500, 0x500]);
        let mut tx = Uart::new_uart0(sim.clone()).with_spin(Spin::AtMost(100));

        tx.init(40_000_000, 115_200, 21, 20);

        assert_eq!(sim.peek(system::PERIP_CLK_EN0), system::UART0);
        assert_eq!(sim.writes_to(system::PERIP_RST_EN0), vec![system::UART0, 0]);

        let clk = sim.peek(uart::UART0_BASE + uart::CLK_CONF);
        assert_eq!(field_get(clk, uart::SCLK_SEL), 3);
        assert_eq!(field_get(clk, uart::SCLK_DIV_NUM), 0);
        assert_ne!(clk & uart::TX_SCLK_EN, 0);

        assert_eq!(sim.writes_to(ID), vec![uart::REG_UPDATE | 0x500]);

        let div = sim.peek(CLKDIV);
        assert_eq!(field_get(div, uart::CLKDIV_INT), 347);
        assert_eq!(field_get(div, uart::CLKDIV_FRAG), 4);

        assert_eq!(sim.peek(gpio::func_out_sel_cfg(21)), signal::U0TXD_OUT as u32);
        assert_eq!(sim.peek(gpio::func_in_sel_cfg(signal::U0RXD_IN)), 20 | gpio::SIG_IN_SEL);
        assert_eq!(sim.writes_to(gpio::ENABLE_W1TS), vec![1 << 21]);
        assert_eq!(sim.writes_to(gpio::ENABLE_W1TC), vec![1 << 20]);
        assert_ne!(sim.peek(io_mux::gpio(20)) & io_mux::FUN_IE, 0);
        assert_eq!(field_get(sim.peek(io_mux::gpio(21)), io_mux::MCU_SEL), 1);
        assert!(sim.writes_to(FIFO).is_empty());
    }

    #[test]
    fn new_divisor_is_pushed_to_the_core() {
        let sim = SimBus::new();
        sim.script(ID, &[0, uart::REG_UPDATE, uart::REG_UPDATE, 0]);
        let mut tx = Uart::new_uart0(sim.clone()).with_spin(Spin::AtMost(100));

        tx.init(40_000_000, 115_200, 21, 20);

        let log = sim.log();
        let divisor_at = sim.first_write(CLKDIV).unwrap();
        let update_at = sim.first_write(ID).unwrap();
        assert!(divisor_at < update_at, "update requested before the divisor");
        assert_eq!(sim.writes_to(ID), vec![uart::REG_UPDATE]);

        // RMW read, then polls until the bit reads back clear
        assert_eq!(sim.reads_of(ID), 4);
        let last_poll = log
            .iter()
            .rposition(|a| matches!(a, Access::Read(r, _) if *r == ID))
            .unwrap();
        assert_eq!(log[last_poll], Access::Read(ID, 0));
        assert!(last_poll > update_at);
    }
}
