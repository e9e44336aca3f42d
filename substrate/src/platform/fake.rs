//! Тестовые двойники символов SDK / Test doubles for the SDK symbols

use std::cell::{Cell, RefCell};

use core::ffi::c_int;

use super::{OutputSink, TimeSource, BOARD_ID_LEN, EOF};

pub struct BoardId {
    pub id: [u8; BOARD_ID_LEN],
}

thread_local! {
    static NOW_US:     Cell<u64> = const { Cell::new(0) };
    static OUTPUT:     RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

pub unsafe fn time_us_64() -> u64 {
    NOW_US.with(|now| {
        let value = now.get();
        now.set(value + 1);
        value
    })
}

pub unsafe fn sleep_ms(ms: u32) {
    NOW_US.with(|now| now.set(now.get() + u64::from(ms) * 1_000));
}

pub unsafe fn get_rand_32() -> u32 {
    0x5eed_1234
}

pub unsafe fn pico_get_unique_board_id(id_out: *mut BoardId) {
    // SAFETY: caller passes a valid out-pointer
    unsafe { (*id_out).id = [0xE6, 0x61, 0x38, 0x52, 0x83, 0x1A, 0x2B, 0x2C] };
}

pub unsafe fn stdio_init_all() -> bool {
    true
}

pub unsafe fn putchar(ch: c_int) -> c_int {
    let refused = FAIL_AFTER.with(|limit| match limit.get() {
        Some(0) => true,
        Some(n) => {
            limit.set(Some(n - 1));
            false
        }
        None => false,
    });
    if refused {
        return EOF;
    }
    OUTPUT.with(|out| out.borrow_mut().push(ch as u8));
    ch
}

/// Забрать и очистить всё, что ушло в `putchar` этого потока.
pub fn take_output() -> Vec<u8> {
    OUTPUT.with(|out| core::mem::take(&mut *out.borrow_mut()))
}

/// `putchar` примет ещё `n` байт, затем начнёт отказывать.
pub fn fail_output_after(n: Option<usize>) {
    FAIL_AFTER.with(|limit| limit.set(n));
}

/// Счётчик, сдвигающийся на `step` мкс при каждом чтении.
/// Counter that advances by `step` µs on every read.
pub struct Counter {
    now:   Cell<u64>,
    step:  u64,
    reads: Cell<u64>,
}

impl Counter {
    pub fn new(start: u64, step: u64) -> Self {
        Self { now: Cell::new(start), step, reads: Cell::new(0) }
    }

    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl TimeSource for Counter {
    fn now_us(&self) -> u64 {
        let value = self.now.get();
        self.now.set(value + self.step);
        self.reads.set(self.reads.get() + 1);
        value
    }
}

/// Приёмник в память, можно заставить отказать после `limit` байт.
#[derive(Default)]
pub struct MemorySink {
    pub bytes: Vec<u8>,
    pub limit: Option<usize>,
}

impl OutputSink for MemorySink {
    fn put(&mut self, byte: u8) -> bool {
        if self.limit.is_some_and(|limit| self.bytes.len() >= limit) {
            return false;
        }
        self.bytes.push(byte);
        true
    }
}
