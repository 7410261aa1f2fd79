//! ESP32-C3 memory map.
//!
//! Base addresses, register offsets and bit layouts for every peripheral the
//! firmware touches, taken from the ESP32-C3 Technical Reference Manual.
//! These are the wire format to the silicon: do not "tidy" them.
//!
//! | Peripheral | Base address  |
//! |------------|---------------|
//! | UART0      | 0x6000_0000   |
//! | GPIO       | 0x6000_4000   |
//! | RTC_CNTL   | 0x6000_8000   |
//! | IO_MUX     | 0x6000_9000   |
//! | LEDC       | 0x6001_9000   |
//! | TIMG0      | 0x6001_F000   |
//! | TIMG1      | 0x6002_0000   |
//! | APB_SARADC | 0x6004_0000   |
//! | SYSTEM     | 0x600C_0000   |

use crate::reg::Field;

/// Clock gating and reset for the digital peripherals.
pub mod system {
    pub const BASE: u32 = 0x600C_0000;

    pub const PERIP_CLK_EN0: u32 = BASE + 0x0010;
    pub const PERIP_RST_EN0: u32 = BASE + 0x0018;

    // Same bit position in PERIP_CLK_EN0 and PERIP_RST_EN0
    pub const UART0: u32 = 1 << 2;
    pub const LEDC: u32 = 1 << 11;
    pub const APB_SARADC: u32 = 1 << 28;
}

pub mod gpio {
    use super::Field;

    pub const BASE: u32 = 0x6000_4000;

    pub const OUT_W1TS: u32 = BASE + 0x0008; // Write 1 to set
    pub const OUT_W1TC: u32 = BASE + 0x000C; // Write 1 to clear
    pub const ENABLE_W1TS: u32 = BASE + 0x0024;
    pub const ENABLE_W1TC: u32 = BASE + 0x0028;
    pub const IN: u32 = BASE + 0x003C;

    /// GPIO0..=GPIO21
    pub const PIN_COUNT: u8 = 22;

    /// Peripheral input signal `signal` takes its level from the GPIO matrix.
    #[inline(always)]
    pub const fn func_in_sel_cfg(signal: u8) -> u32 {
        BASE + 0x0154 + 4 * signal as u32
    }

    /// GPIO `pin` is driven by the output signal selected here.
    #[inline(always)]
    pub const fn func_out_sel_cfg(pin: u8) -> u32 {
        BASE + 0x0554 + 4 * pin as u32
    }

    // FUNCy_IN_SEL_CFG
    pub const IN_SEL: Field = Field::new(0, 5);
    pub const SIG_IN_SEL: u32 = 1 << 6;

    // FUNCn_OUT_SEL_CFG
    pub const OUT_SEL: Field = Field::new(0, 8);
    pub const OUT_INV_SEL: u32 = 1 << 8;
    pub const OEN_SEL: u32 = 1 << 9;
    pub const OEN_INV_SEL: u32 = 1 << 10;

    /// Indices into the GPIO matrix signal table.
    pub mod signal {
        pub const U0TXD_OUT: u8 = 6;
        pub const U0RXD_IN: u8 = 6;
        pub const LEDC_LS_SIG_OUT0: u8 = 45;
    }
}

pub mod io_mux {
    use super::Field;

    pub const BASE: u32 = 0x6000_9000;

    /// IO_MUX_GPIOn_REG
    #[inline(always)]
    pub const fn gpio(pin: u8) -> u32 {
        BASE + 0x0004 + 4 * pin as u32
    }

    pub const FUN_WPD: u32 = 1 << 7; // Weak pull-down
    pub const FUN_WPU: u32 = 1 << 8; // Weak pull-up
    pub const FUN_IE: u32 = 1 << 9; // Input enable
    pub const MCU_SEL: Field = Field::new(12, 3);
}

pub mod saradc {
    use super::Field;

    pub const BASE: u32 = 0x6004_0000;

    pub const CTRL: u32 = BASE + 0x0000;
    pub const START_FORCE: u32 = 1 << 0;
    pub const START: u32 = 1 << 1;
    pub const SAR_CLK_GATED: u32 = 1 << 6;
    pub const SAR_CLK_DIV: Field = Field::new(7, 8);
    pub const XPD_SAR_FORCE: Field = Field::new(27, 2);

    pub const ONETIME_SAMPLE: u32 = BASE + 0x0020;
    pub const ADC1_ONETIME_SAMPLE: u32 = 1 << 31;
    pub const ONETIME_START: u32 = 1 << 29;
    pub const ONETIME_CHANNEL: Field = Field::new(25, 4);
    pub const ONETIME_ATTEN: Field = Field::new(23, 2);

    pub const ADC1_DATA_STATUS: u32 = BASE + 0x002C;
    pub const ADC1_DATA: Field = Field::new(0, 17);

    pub const INT_ENA: u32 = BASE + 0x0040;
    pub const INT_ST: u32 = BASE + 0x0048;
    pub const INT_CLR: u32 = BASE + 0x004C;
    pub const ADC1_DONE: u32 = 1 << 31; // Same bit in INT_ENA/INT_ST/INT_CLR
}

pub mod ledc {
    use super::Field;

    pub const BASE: u32 = 0x6001_9000;

    // Low-speed channel 0
    pub const CH0_CONF0: u32 = BASE + 0x0000;
    pub const CH0_HPOINT: u32 = BASE + 0x0004;
    pub const CH0_DUTY: u32 = BASE + 0x0008;
    pub const CH0_CONF1: u32 = BASE + 0x000C;

    pub const TIMER_SEL: Field = Field::new(0, 2);
    pub const SIG_OUT_EN: u32 = 1 << 2;
    pub const IDLE_LV: u32 = 1 << 3;
    pub const CH_PARA_UP: u32 = 1 << 4;
    pub const DUTY_START: u32 = 1 << 31;

    /// The duty register carries 4 fractional bits below the integer duty.
    pub const DUTY_FRAC_BITS: u32 = 4;

    // Low-speed timer 0
    pub const TIMER0_CONF: u32 = BASE + 0x00A0;
    pub const TIMER_DUTY_RES: Field = Field::new(0, 4);
    pub const TIMER_CLK_DIV: Field = Field::new(4, 18);
    pub const TIMER_PAUSE: u32 = 1 << 22;
    pub const TIMER_RST: u32 = 1 << 23;
    pub const TIMER_PARA_UP: u32 = 1 << 25;

    pub const CONF: u32 = BASE + 0x00D0;
    pub const APB_CLK_SEL: Field = Field::new(0, 2);
    pub const APB_CLK_SEL_APB: u32 = 1;
    pub const CLK_EN: u32 = 1 << 31;
}

pub mod uart {
    use super::Field;

    #[inline(always)]
    pub const fn base(n: u32) -> u32 {
        0x6000_0000 + 0x1000 * n
    }

    pub const UART0_BASE: u32 = base(0);

    // Offsets from the instance base
    pub const FIFO: u32 = 0x0000;
    pub const CLKDIV: u32 = 0x0014;
    pub const STATUS: u32 = 0x001C;
    pub const CLK_CONF: u32 = 0x0078;
    pub const ID: u32 = 0x0080;

    pub const CLKDIV_INT: Field = Field::new(0, 12);
    pub const CLKDIV_FRAG: Field = Field::new(20, 4);

    pub const TXFIFO_CNT: Field = Field::new(16, 10);
    pub const FIFO_SIZE: u32 = 128;

    pub const SCLK_DIV_B: Field = Field::new(0, 6);
    pub const SCLK_DIV_A: Field = Field::new(6, 6);
    pub const SCLK_DIV_NUM: Field = Field::new(12, 8);
    pub const SCLK_SEL: Field = Field::new(20, 2);
    pub const SCLK_SEL_XTAL: u32 = 3;
    pub const SCLK_EN: u32 = 1 << 22;
    pub const TX_SCLK_EN: u32 = 1 << 24;
    pub const RX_SCLK_EN: u32 = 1 << 25;

    // UART_ID_REG: set to push APB-side config into the core clock domain,
    // hardware clears it when done
    pub const REG_UPDATE: u32 = 1 << 31;
}

/// Timer group main-system watchdog.
pub mod timg {
    pub const TIMG0_BASE: u32 = 0x6001_F000;
    pub const TIMG1_BASE: u32 = 0x6002_0000;

    // Offsets from the group base
    pub const WDTCONFIG0: u32 = 0x0048;
    pub const WDTWPROTECT: u32 = 0x0064;

    pub const WDT_EN: u32 = 1 << 31;
    pub const WDT_CONF_UPDATE_EN: u32 = 1 << 22;

    pub const WDT_WKEY: u32 = 0x50D8_3AA1;
}

/// RTC watchdog and super watchdog.
pub mod rtc_cntl {
    pub const BASE: u32 = 0x6000_8000;

    pub const WDTCONFIG0: u32 = BASE + 0x0090;
    pub const WDTWPROTECT: u32 = BASE + 0x00A8;
    pub const SWD_CONF: u32 = BASE + 0x00AC;
    pub const SWD_WPROTECT: u32 = BASE + 0x00B0;

    pub const WDT_EN: u32 = 1 << 31;
    pub const SWD_AUTO_FEED_EN: u32 = 1 << 31;
    pub const SWD_DISABLE: u32 = 1 << 30;

    pub const WDT_WKEY: u32 = 0x50D8_3AA1;
    pub const SWD_WKEY: u32 = 0x8F1D_312A;
}
