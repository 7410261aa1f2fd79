//! Watchdog shutdown.
//!
//! The ROM bootloader leaves the timer-group watchdogs, the RTC watchdog and
//! the super watchdog armed. A superloop that never feeds them gets reset,
//! so they are switched off once, before any other peripheral is touched.
//!
//! Each watchdog's configuration is write-protected: unlock with the key,
//! write, lock again by writing anything else.

use crate::reg::Bus;
use crate::soc::{rtc_cntl, timg};

/// Disable the main-system watchdog of the timer group at `timg_base`.
pub fn disable<B: Bus>(bus: &mut B, timg_base: u32) {
    let wprotect = timg_base + timg::WDTWPROTECT;
    let config0 = timg_base + timg::WDTCONFIG0;

    bus.write(wprotect, timg::WDT_WKEY);
    // Enable, stage actions and flash-boot mode all off
    bus.write(config0, 0);
    // Latch the new configuration into the watchdog clock domain
    bus.set_bits(config0, timg::WDT_CONF_UPDATE_EN);
    bus.write(wprotect, 0);
}

/// Disable the RTC watchdog and put the super watchdog on auto-feed.
pub fn disable_rtc<B: Bus>(bus: &mut B) {
    bus.write(rtc_cntl::WDTWPROTECT, rtc_cntl::WDT_WKEY);
    bus.write(rtc_cntl::WDTCONFIG0, 0);
    bus.write(rtc_cntl::WDTWPROTECT, 0);

    bus.write(rtc_cntl::SWD_WPROTECT, rtc_cntl::SWD_WKEY);
    bus.set_bits(
        rtc_cntl::SWD_CONF,
        rtc_cntl::SWD_AUTO_FEED_EN | rtc_cntl::SWD_DISABLE,
    );
    bus.write(rtc_cntl::SWD_WPROTECT, 0);
}

/// TIMG0, TIMG1, then the RTC domain.
pub fn disable_all<B: Bus>(bus: &mut B) {
    disable(bus, timg::TIMG0_BASE);
    disable(bus, timg::TIMG1_BASE);
    disable_rtc(bus);
    log::info!("wdt: all watchdogs disabled");
}
