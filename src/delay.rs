//! Busy-wait delays.
//!
//! No timer is configured: a delay is a number of loop iterations, so its
//! length depends on the CPU clock.

use core::hint::{black_box, spin_loop};

/// Burn `iterations` loop turns. The counter goes through `black_box` so the
/// loop survives optimization.
#[inline(never)]
pub fn spin(iterations: u32) {
    for i in 0..iterations {
        black_box(i);
        spin_loop();
    }
}
