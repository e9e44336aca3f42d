//! Форматирование f64 без libc / f64 formatting without libc

use core::fmt::{self, Write};

/// `fmt::Write` поверх фиксированного буфера; переполнение — ошибка.
/// `fmt::Write` over a fixed buffer; overflow is an error.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Записать `value` в `buf` с завершающим NUL.
///
/// Representation round-trips (shortest digits, exponent form for very
/// large/small magnitudes). Returns `false` if `buf` is empty or too
/// small; a non-empty buffer is left NUL-terminated either way.
pub fn format_double(value: f64, buf: &mut [u8]) -> bool {
    let Some(text_cap) = buf.len().checked_sub(1) else {
        return false;
    };
    let mut writer = SliceWriter::new(&mut buf[..text_cap]);
    let ok = write!(writer, "{:?}", value).is_ok();
    let end = if ok { writer.len() } else { 0 };
    buf[end] = 0;
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ffi::CStr;

    fn formatted(value: f64, cap: usize) -> (bool, Vec<u8>) {
        let mut buf = vec![0xFFu8; cap];
        let ok = format_double(value, &mut buf);
        (ok, buf)
    }

    #[test]
    fn formats_with_terminator() {
        let (ok, buf) = formatted(21.5, 16);
        assert!(ok);
        let text = CStr::from_bytes_until_nul(&buf).unwrap();
        assert_eq!(text.to_str().unwrap(), "21.5");
    }

    #[test]
    fn large_values_use_exponent_and_round_trip() {
        let (ok, buf) = formatted(1.0e300, 32);
        assert!(ok);
        let text = CStr::from_bytes_until_nul(&buf).unwrap().to_str().unwrap();
        assert!(text.contains('e'));
        assert_eq!(text.parse::<f64>().unwrap(), 1.0e300);

        let value = 0.1 + 0.2;
        let (ok, buf) = formatted(value, 32);
        assert!(ok);
        let text = CStr::from_bytes_until_nul(&buf).unwrap().to_str().unwrap();
        assert_eq!(text.parse::<f64>().unwrap(), value);
    }

    #[test]
    fn too_small_buffer_fails_but_terminates() {
        let (ok, buf) = formatted(123.456, 4);
        assert!(!ok);
        assert_eq!(buf[0], 0);
        assert!(!format_double(1.0, &mut []));
    }

    #[test]
    fn exact_fit_needs_room_for_nul() {
        // "1.5" + NUL
        let (ok, _) = formatted(1.5, 4);
        assert!(ok);
        let (ok, _) = formatted(1.5, 3);
        assert!(!ok);
    }
}
