//! Контракт с Pico SDK: реализации приходят из .a при линковке.
//! Forward contract; the real SDK libraries satisfy it at link time.

use core::ffi::c_int;

use super::BOARD_ID_LEN;

/// `pico_unique_board_id_t`
#[repr(C)]
pub struct BoardId {
    pub id: [u8; BOARD_ID_LEN],
}

extern "C" {
    pub fn time_us_64() -> u64;
    pub fn sleep_ms(ms: u32);
    pub fn get_rand_32() -> u32;
    pub fn pico_get_unique_board_id(id_out: *mut BoardId);
    pub fn stdio_init_all() -> bool;
    pub fn putchar(ch: c_int) -> c_int;
}
