//! Сканирование эфира / Wifi scanning
//!
//! Драйвер зовёт `extern "C"` callback с непрозрачным `env` на каждый
//! найденный BSS. Трамплин превращает `env` обратно в обработчик.
//! The driver calls back with an opaque `env` per discovered BSS; a
//! monomorphised trampoline turns `env` back into the handler.
//!
//! Драйвер может игнорировать код возврата, поэтому остановку держит
//! `ScanSession`: после `Stop` обработчик больше не вызывается.
//! The driver may ignore the callback's return code, so `ScanSession`
//! holds the stop: after `Stop` the handler is not called again.

use core::ffi::{c_int, c_void};

use libpicobridge::cyw43::ScanResult;

/// Продолжать ли сканирование / Whether the scan should go on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

impl ScanControl {
    /// Ненулевой код — просьба к драйверу остановиться.
    /// Non-zero is a stop request the driver may ignore.
    pub const fn code(self) -> c_int {
        match self {
            ScanControl::Continue => 0,
            ScanControl::Stop     => 1,
        }
    }
}

pub trait ScanHandler {
    /// Результат валиден только на время вызова.
    /// `result` is only valid for the duration of the call.
    fn on_result(&mut self, result: &ScanResult) -> ScanControl;
}

impl<F> ScanHandler for F
where
    F: FnMut(&ScanResult) -> ScanControl,
{
    fn on_result(&mut self, result: &ScanResult) -> ScanControl {
        self(result)
    }
}

/// Обработчик одного сканирования и признак остановки.
/// A handler for one scan plus its stop latch.
pub struct ScanSession<H> {
    handler: H,
    stopped: bool,
}

impl<H: ScanHandler> ScanSession<H> {
    pub const fn new(handler: H) -> Self {
        Self { handler, stopped: false }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn restart(&mut self) {
        self.stopped = false;
    }

    fn deliver(&mut self, result: &ScanResult) -> ScanControl {
        if self.stopped {
            return ScanControl::Stop;
        }
        let control = self.handler.on_result(result);
        self.stopped = control == ScanControl::Stop;
        control
    }
}

/// # Safety
/// `env` must be the `*mut ScanSession<H>` registered with the driver for
/// this scan, and `result` null or valid for the call.
pub(crate) unsafe extern "C" fn trampoline<H: ScanHandler>(
    env: *mut c_void,
    result: *const ScanResult,
) -> c_int {
    // SAFETY: guaranteed by the caller
    let (session, result) =
        unsafe { (env.cast::<ScanSession<H>>().as_mut(), result.as_ref()) };
    match (session, result) {
        (Some(session), Some(result)) => session.deliver(result).code(),
        _ => ScanControl::Stop.code(),
    }
}
