//! Bare-metal ESP32-C3 peripheral drivers and control loop
//!
//! Every peripheral is programmed through its registers, without ESP-IDF or
//! HAL drivers. Drivers sit on a [`reg::Bus`], which is the real
//! memory map on the chip and a simulated register file in the host tests.

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod app;
pub mod config;
pub mod delay;
pub mod fader;
pub mod gpio;
pub mod ledc;
pub mod reg;
pub mod soc;
pub mod uart;
pub mod wdt;

#[cfg(test)]
mod sim;
