//! Консоль — stdio Pico SDK / Console: Pico SDK stdio
//!
//! Единственный приёмник вывода (UART или USB CDC, как собран SDK).
//! Поверх него — макросы `pprint!`/`pprintln!` и бэкенд для `log`.
//! The one output sink, with `pprint!`/`pprintln!` and a `log` backend
//! layered on top.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

use crate::platform::{OutputSink, Sdk};

/// Пишет в любой приёмник, `\n` → `\r\n` для терминалов.
/// Writes into any sink, expanding `\n` to `\r\n` for serial terminals.
pub struct ConsoleWriter<S> {
    sink: S,
}

impl<S: OutputSink> ConsoleWriter<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn put(&mut self, byte: u8) -> fmt::Result {
        if self.sink.put(byte) { Ok(()) } else { Err(fmt::Error) }
    }
}

impl<S: OutputSink> fmt::Write for ConsoleWriter<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.put(b'\r')?;
            }
            self.put(byte)?;
        }
        Ok(())
    }
}

static CONSOLE: Mutex<ConsoleWriter<Sdk>> = Mutex::new(ConsoleWriter::new(Sdk));

/// Внутренняя функция для макроса pprint!
/// Internal function for the pprint! macro
pub fn _print(args: fmt::Arguments) {
    use fmt::Write;
    CONSOLE.lock().write_fmt(args).ok();
}

/// Вывод в консоль / Console print
#[macro_export]
macro_rules! pprint {
    ($($arg:tt)*) => {
        $crate::console::_print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! pprintln {
    ()            => ($crate::pprint!("\n"));
    ($($arg:tt)*) => ($crate::pprint!("{}\n", format_args!($($arg)*)));
}

// ── Бэкенд log / log backend ────────────────────────────────────────────────

/// `[LEVEL target] message`
pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            _print(format_args!(
                "[{:<5} {}] {}\n",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Поднять stdio и поставить логгер. Повторный вызов ничего не делает.
/// Bring up stdio and install the logger; later calls are no-ops.
pub fn init(level: LevelFilter) {
    if INSTALLED.swap(true, Ordering::AcqRel) {
        return;
    }
    Sdk.stdio_init();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;
    use crate::platform::fake::{self, MemorySink};

    #[test]
    fn newlines_become_crlf() {
        let mut writer = ConsoleWriter::new(MemorySink::default());
        write!(writer, "a\nb").unwrap();
        assert_eq!(writer.sink().bytes, b"a\r\nb");
    }

    #[test]
    fn refused_byte_is_a_fmt_error() {
        let mut writer = ConsoleWriter::new(MemorySink { limit: Some(2), ..Default::default() });
        assert!(write!(writer, "abc").is_err());
        assert_eq!(writer.sink().bytes, b"ab");
    }

    #[test]
    fn macros_and_logger_reach_stdio() {
        fake::fail_output_after(None);
        fake::take_output();

        crate::pprintln!("boot {}", 1);
        assert_eq!(fake::take_output(), b"boot 1\r\n");

        init(LevelFilter::Info);
        init(LevelFilter::Trace);
        assert_eq!(log::max_level(), LevelFilter::Info);

        log::info!(target: "radio", "up");
        log::debug!(target: "radio", "hidden");
        assert_eq!(fake::take_output(), b"[INFO  radio] up\r\n");
    }
}
