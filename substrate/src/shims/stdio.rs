//! fputs и stderr / fputs and stderr
//!
//! Поток вывода один — аргумент `stream` игнорируется.
//! There is a single output sink; the `stream` argument is ignored.

use core::ffi::CStr;

use libpicobridge::{Error, Result};

use crate::platform::OutputSink;

/// Отправить байты строки в `sink` до первого отказа.
/// Forward each byte to `sink`; stop at the first refusal.
pub fn fputs<S: OutputSink>(sink: &mut S, text: &CStr) -> Result<()> {
    for &byte in text.to_bytes() {
        if !sink.put(byte) {
            return Err(Error::Io);
        }
    }
    Ok(())
}

#[cfg(not(test))]
mod exports {
    use core::ffi::{c_char, c_int, c_void, CStr};
    use core::ptr;

    use libpicobridge::Error;

    use crate::platform::{Sdk, EOF};
    use crate::shims::errno;

    static mut STDERR_STREAM: *mut c_void = ptr::null_mut();

    /// `stderr` для кода, собранного против Darwin-подобного libc.
    #[no_mangle]
    pub static mut __stderrp: *mut *mut c_void = unsafe { ptr::addr_of_mut!(STDERR_STREAM) };

    #[no_mangle]
    pub unsafe extern "C" fn _fputs(text: *const c_char, _stream: *mut c_void) -> c_int {
        if text.is_null() {
            errno::record(Error::InvalidArgument);
            return EOF;
        }
        // SAFETY: caller passes a NUL-terminated string
        let text = unsafe { CStr::from_ptr(text) };
        match super::fputs(&mut Sdk, text) {
            Ok(())  => 0,
            Err(_)  => EOF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{self, MemorySink};
    use crate::platform::Sdk;

    #[test]
    fn writes_every_byte() {
        let mut sink = MemorySink::default();
        assert_eq!(fputs(&mut sink, c"hello\n"), Ok(()));
        assert_eq!(sink.bytes, b"hello\n");
    }

    #[test]
    fn stops_at_first_refusal() {
        let mut sink = MemorySink { limit: Some(3), ..Default::default() };
        assert_eq!(fputs(&mut sink, c"abcdef"), Err(Error::Io));
        assert_eq!(sink.bytes, b"abc");
    }

    #[test]
    fn sdk_sink_goes_through_putchar() {
        fake::take_output();
        fake::fail_output_after(None);
        assert_eq!(fputs(&mut Sdk, c"ok"), Ok(()));
        assert_eq!(fake::take_output(), b"ok");

        fake::fail_output_after(Some(1));
        assert_eq!(fputs(&mut Sdk, c"no"), Err(Error::Io));
        assert_eq!(fake::take_output(), b"n");
        fake::fail_output_after(None);
    }
}
