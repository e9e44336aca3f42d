//! Платформа — символы Pico SDK / Platform: Pico SDK symbols
//!
//! Всё, что нужно от SDK, объявлено в `sdk` как контракт для линковщика.
//! В тестах тот же набор функций подменяет `fake`.
//! Everything needed from the SDK is declared in `sdk` as a link-time
//! contract; under test the same function set comes from `fake`.

use core::ffi::c_int;

#[cfg(not(test))]
mod sdk;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
use fake as sdk;

pub const EOF: c_int = -1;

pub const BOARD_ID_LEN: usize = 8;

/// Источник микросекунд / Microsecond source
pub trait TimeSource {
    fn now_us(&self) -> u64;
}

/// Приёмник вывода по байту / Byte-wise output sink
pub trait OutputSink {
    /// `false` — байт не принят / byte refused
    fn put(&mut self, byte: u8) -> bool;
}

/// Сам Pico SDK: единственный таймер и единственный поток вывода.
/// The Pico SDK itself: the one timer and the one output stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sdk;

impl TimeSource for Sdk {
    fn now_us(&self) -> u64 {
        // SAFETY: SDK timer read, no preconditions
        unsafe { sdk::time_us_64() }
    }
}

impl OutputSink for Sdk {
    fn put(&mut self, byte: u8) -> bool {
        // SAFETY: SDK stdio, no preconditions
        unsafe { sdk::putchar(byte as c_int) != EOF }
    }
}

impl Sdk {
    /// Поднять stdio (UART/USB) / Bring up stdio (UART/USB)
    pub fn stdio_init(&self) -> bool {
        // SAFETY: idempotent SDK init
        unsafe { sdk::stdio_init_all() }
    }

    pub fn delay_ms(&self, ms: u32) {
        // SAFETY: blocking SDK sleep
        unsafe { sdk::sleep_ms(ms) }
    }

    pub fn random_u32(&self) -> u32 {
        // SAFETY: SDK RNG, no preconditions
        unsafe { sdk::get_rand_32() }
    }

    /// Уникальный ID платы из flash / Board unique ID from flash
    pub fn board_id(&self) -> [u8; BOARD_ID_LEN] {
        let mut id = sdk::BoardId { id: [0; BOARD_ID_LEN] };
        // SAFETY: valid out-pointer for the duration of the call
        unsafe { sdk::pico_get_unique_board_id(&mut id) };
        id.id
    }
}
