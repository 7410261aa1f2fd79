//! Board wiring and application parameters.
//!
//! Everything here is fixed at build time; the `const` assertions at the
//! bottom reject a configuration the hardware cannot honor.

use crate::adc::Attenuation;
use crate::ledc::{TimerConfig, ValidTimer};
use crate::soc;

// Pin plan
pub const POT_GPIO: u8 = 0; // Potentiometer, analog in (ADC1_CH0)
pub const BUTTON_GPIO: u8 = 2; // Button / echo, digital in
pub const LED_GPIO: u8 = 3; // PWM LED
pub const ECHO_GPIO: u8 = 4; // HC-SR04 echo header, digital in
pub const LED2_GPIO: u8 = 5; // Secondary LED
pub const UART0_RX_GPIO: u8 = 20;
pub const UART0_TX_GPIO: u8 = 21;

/// LEDC low-speed timer 0: 2 kHz, 10-bit duty from the 80 MHz APB clock.
/// Divider checked at compile time.
pub const PWM_TIMER: ValidTimer = ValidTimer::new(TimerConfig {
    source_hz: 80_000_000,
    pwm_hz: 2_000,
    resolution_bits: 10,
    frac_bits: 8,
});

pub const ADC_CHANNEL: u8 = 0;
pub const ADC_ATTEN: Attenuation = Attenuation::Db11;
pub const ADC_SAR_CLK_DIV: u32 = 4;

pub const UART_BAUD: u32 = 115_200;
pub const UART_SOURCE_HZ: u32 = 40_000_000; // XTAL

/// Busy-wait between control-loop iterations.
pub const LOOP_DELAY_SPINS: u32 = 5000;

pub const STARTUP_MESSAGE: &str = "Sistema iniciado. Esperando boton/pulso...\r\n";
pub const ATTENTION_MESSAGE: &str = "!ATENCION: Deteccion activada. LED detenido.\r\n";

const _: () = {
    let pins = [
        POT_GPIO,
        BUTTON_GPIO,
        LED_GPIO,
        ECHO_GPIO,
        LED2_GPIO,
        UART0_RX_GPIO,
        UART0_TX_GPIO,
    ];
    let mut i = 0;
    while i < pins.len() {
        assert!(pins[i] < soc::gpio::PIN_COUNT, "pin out of range");
        i += 1;
    }
    // ADC1 only reaches GPIO0..=GPIO4
    assert!(ADC_CHANNEL <= 4);
    assert!(ADC_SAR_CLK_DIV <= soc::saradc::SAR_CLK_DIV.max());
    assert!(UART_BAUD > 0);
};
