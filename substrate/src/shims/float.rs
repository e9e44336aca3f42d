//! Форматирование f64 для сетевого стека / f64 formatting for the network stack
//!
//! Сам разбор и печать живут в `libpicobridge::fmt`; здесь только
//! C-граница. The formatting itself lives in `libpicobridge::fmt`; this
//! is the C boundary only.

use libpicobridge::fmt;

/// Буфер C как срез; нулевой указатель или длина 0 → `None`.
///
/// # Safety
/// A non-null `buf` must span `len` writable bytes.
pub unsafe fn c_buffer<'a>(buf: *mut u8, len: usize) -> Option<&'a mut [u8]> {
    if buf.is_null() || len == 0 {
        return None;
    }
    // SAFETY: guaranteed by the caller
    Some(unsafe { core::slice::from_raw_parts_mut(buf, len) })
}

/// `false`, если буфера нет или он мал; непустой буфер всегда с NUL.
pub fn format_into(value: f64, buf: Option<&mut [u8]>) -> bool {
    buf.is_some_and(|buf| fmt::format_double(value, buf))
}

#[cfg(not(test))]
mod exports {
    use core::ffi::c_char;

    #[no_mangle]
    pub unsafe extern "C" fn mg_bridge_format_double(
        value: f64,
        buf: *mut c_char,
        len: usize,
    ) -> bool {
        // SAFETY: the stack passes its own buffer and its length
        let buf = unsafe { super::c_buffer(buf.cast::<u8>(), len) };
        super::format_into(value, buf)
    }
}
