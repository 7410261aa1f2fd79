//! Bare-metal application entry point
//! ESP-IDF bootloader does minimal initialization, then calls this
//!
//! ESP-IDF provides:
//! - 2nd stage bootloader
//! - Flash/cache configuration
//! - Basic C runtime (.data, .bss, stack)
//!
//! We provide everything else (no FreeRTOS, no ESP-IDF libraries). Every
//! peripheral is programmed register by register.

#![cfg_attr(target_arch = "riscv32", no_std)]
#![cfg_attr(target_arch = "riscv32", no_main)]

#[cfg(target_arch = "riscv32")]
use esp32c3_bare_metal_fader::{app::App, reg::Mmio};
#[cfg(target_arch = "riscv32")]
use esp_backtrace as _;
#[cfg(target_arch = "riscv32")]
use esp_hal::prelude::*;

#[cfg(target_arch = "riscv32")]
#[entry]
fn main() -> ! {
    // Watchdogs are still armed here. App::init disables them before any
    // other register write.
    let bus = unsafe { Mmio::new() };
    let mut app = App::new(bus);

    esp_println::logger::init_logger(log::LevelFilter::Info);
    log::info!("=== ESP32-C3 BARE METAL FADER BOOTING ===");

    app.init();
    app.run()
}

#[cfg(not(target_arch = "riscv32"))]
fn main() {
    eprintln!(
        "esp32c3-bare-metal-fader runs on the ESP32-C3 only: \
         cargo build --release --target riscv32imc-unknown-none-elf"
    );
}
