//! memset_s — ограниченное заполнение / bounded fill
//!
//! Запись идёт через `write_volatile`, чтобы компилятор не выбросил
//! затирание секретов.
//! Writes go through `write_volatile` so wiping secrets is not elided.

use core::ptr;

use libpicobridge::{Error, Result};

/// Заполнить `min(count, dest.len())` байт значением `ch`.
///
/// Empty destination → `InvalidArgument`, nothing written.
/// `count > dest.len()` → the whole destination is filled, then `Range`.
pub fn memset_s(dest: &mut [u8], ch: i32, count: usize) -> Result<()> {
    if dest.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let n = count.min(dest.len());
    for byte in &mut dest[..n] {
        // SAFETY: `byte` is a valid, exclusive reference
        unsafe { ptr::write_volatile(byte, ch as u8) };
    }

    if count > dest.len() { Err(Error::Range) } else { Ok(()) }
}

/// `RSIZE_MAX` из C11 Annex K: больше — нарушение ограничений.
/// Larger capacities are a constraint violation and never become a slice.
pub const RSIZE_MAX: usize = isize::MAX as usize;

/// Сырой вход: null, нулевая или больше `RSIZE_MAX` ёмкость — `InvalidArgument`.
///
/// # Safety
/// A non-null `dest` with `0 < dest_max <= RSIZE_MAX` must span `dest_max`
/// writable bytes.
pub unsafe fn memset_raw(dest: *mut u8, dest_max: usize, ch: i32, count: usize) -> Result<()> {
    if dest.is_null() || dest_max == 0 || dest_max > RSIZE_MAX {
        return Err(Error::InvalidArgument);
    }
    // SAFETY: guaranteed by the caller for this range of `dest_max`
    let dest = unsafe { core::slice::from_raw_parts_mut(dest, dest_max) };
    memset_s(dest, ch, count)
}

#[cfg(not(test))]
mod exports {
    use core::ffi::{c_int, c_void};

    use crate::shims::errno;

    /// C11 Annex K: возвращает 0 или код ошибки (и пишет его в errno).
    #[no_mangle]
    pub unsafe extern "C" fn memset_s(
        dest: *mut c_void,
        dest_max: usize,
        ch: c_int,
        count: usize,
    ) -> c_int {
        // SAFETY: caller guarantees `dest` spans `dest_max` writable bytes
        match unsafe { super::memset_raw(dest.cast::<u8>(), dest_max, ch, count) } {
            Ok(())   => 0,
            Err(err) => errno::record(err).errno(),
        }
    }
}
