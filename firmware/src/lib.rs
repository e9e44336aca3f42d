//! PicoBridge firmware — точка входа / entry point
//!
//! `main` вызывает crt0 Pico SDK после инициализации тактов и памяти.
//! Called by the Pico SDK's crt0 once clocks and memory are up.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(not(target_os = "none"), allow(dead_code))]
#![deny(unsafe_op_in_unsafe_fn)]

use libpicobridge::netcfg::WifiSecurity;
use libpicobridge::PicoError;
use log::{error, info, LevelFilter};
use picobridge_substrate::platform::Sdk;
use picobridge_substrate::radio::{Radio, SoftApConfig};
use picobridge_substrate::time::monotonic_nanoseconds;
use picobridge_substrate::{pprintln, Error, Result};

const LOG_LEVEL: LevelFilter = LevelFilter::Info;

const SOFT_AP: SoftApConfig<'static> = SoftApConfig {
    ssid:     "picobridge",
    password: "picobridge-setup",
    security: WifiSecurity::WPA2,
    channel:  6,
};

const BLINK_PERIOD_NS: i64 = 1_000_000_000;

fn bring_up() -> Result<Radio> {
    let mut radio = Radio::take().ok_or(Error::Sdk(PicoError::ResourceInUse))?;
    radio.init()?;
    radio.enable_ap_mode(&SOFT_AP)?;
    Ok(radio)
}

fn run() -> ! {
    picobridge_substrate::console::init(LOG_LEVEL);
    pprintln!("PicoBridge booting...");

    let id = Sdk.board_id();
    info!(
        "board {:02x}{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        id[0], id[1], id[2], id[3], id[4], id[5], id[6], id[7]
    );

    let mut radio = match bring_up() {
        Ok(radio) => radio,
        Err(err) => {
            error!("radio bring-up failed: {:?}", err);
            loop {
                core::hint::spin_loop();
            }
        }
    };

    let mut led = false;
    let mut next_toggle = monotonic_nanoseconds(&Sdk);
    loop {
        radio.poll();
        let now = monotonic_nanoseconds(&Sdk);
        if now >= next_toggle {
            led = !led;
            radio.set_led(led);
            next_toggle = now + BLINK_PERIOD_NS;
        }
    }
}

#[cfg(target_os = "none")]
mod entry {
    use core::ffi::c_int;
    use core::panic::PanicInfo;

    #[no_mangle]
    pub extern "C" fn main() -> c_int {
        super::run()
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        picobridge_substrate::pprintln!("PANIC: {}", info);
        loop {
            core::hint::spin_loop();
        }
    }
}
