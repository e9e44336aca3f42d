//! Ячейка errno / The errno cell
//!
//! Одна ячейка на процесс вместо per-thread errno: поток управления
//! ровно один. Адрес ячейки отдаётся через `__error`.
//! One process-wide slot stands in for a per-thread errno; there is
//! exactly one thread of control. `__error` hands out its address.

use core::ffi::c_int;
use core::sync::atomic::{AtomicI32, Ordering};

use libpicobridge::{Error, Result};

static ERRNO: AtomicI32 = AtomicI32::new(0);

pub fn get() -> i32 {
    ERRNO.load(Ordering::Relaxed)
}

pub fn set(code: i32) {
    ERRNO.store(code, Ordering::Relaxed);
}

/// Записать ошибку в errno и вернуть её / Record `err` in errno and hand it back
pub fn record(err: Error) -> Error {
    set(err.errno());
    err
}

/// Соглашение POSIX: 0 или -1 + errno / POSIX convention: 0, or -1 plus errno
pub fn status(result: Result<()>) -> c_int {
    match result {
        Ok(())   => 0,
        Err(err) => {
            record(err);
            -1
        }
    }
}

pub fn as_ptr() -> *mut c_int {
    ERRNO.as_ptr()
}

#[cfg(not(test))]
mod exports {
    use core::ffi::c_int;

    #[no_mangle]
    pub extern "C" fn __error() -> *mut c_int {
        super::as_ptr()
    }
}
