//! Адаптер источника времени / Time Source Adapter
//!
//! Один аппаратный счётчик микросекунд (`time_us_64`) даёт:
//!   - монотонные наносекунды для рантайма (`steady_clock::now`)
//!   - POSIX `clock_gettime` / `clock_getres`
//!   - блокирующий `nanosleep` (активное ожидание)
//!
//! Счётчик 64-битный и за реальное время работы не переполняется,
//! поэтому показания не убывают.
//! The 64-bit counter never wraps within any realistic uptime, so
//! readings never decrease.

use core::hint;

use libpicobridge::time::{self, SteadyTimePoint, Timespec};
use libpicobridge::{Error, Result};

use crate::platform::TimeSource;

/// Наносекунды с первого чтения счётчика.
/// Nanoseconds since the counter's epoch (its first tick).
pub fn monotonic_nanoseconds<T: TimeSource>(clock: &T) -> i64 {
    time::monotonic_nanos(clock.now_us())
}

/// `clock_gettime`: вид часов не важен — физические часы одни.
/// The clock kind is ignored: only one physical clock exists.
pub fn clock_gettime<T: TimeSource>(clock: &T, tp: Option<&mut Timespec>) -> Result<()> {
    let tp = tp.ok_or(Error::InvalidArgument)?;
    *tp = Timespec::from_micros(clock.now_us());
    Ok(())
}

/// `clock_getres`: всегда 1 мкс / always 1 µs
pub fn clock_getres(res: Option<&mut Timespec>) -> Result<()> {
    let res = res.ok_or(Error::InvalidArgument)?;
    *res = Timespec::RESOLUTION;
    Ok(())
}

/// Активное ожидание не меньше `requested`.
///
/// Rounds the request up to whole microseconds and spins on the counter
/// until the deadline. Blocks the only core for the whole duration and
/// cannot be cancelled; remaining time is always zero on success.
/// An invalid request fails before any wait and leaves `remaining`
/// untouched.
pub fn nanosleep<T: TimeSource>(
    clock: &T,
    requested: Option<&Timespec>,
    remaining: Option<&mut Timespec>,
) -> Result<()> {
    let requested = requested.ok_or(Error::InvalidArgument)?;
    let delay_us = requested.ceil_micros()?;

    if let Some(remaining) = remaining {
        *remaining = Timespec::ZERO;
    }

    let deadline = clock.now_us().saturating_add(delay_us);
    while clock.now_us() < deadline {
        hint::spin_loop();
    }
    Ok(())
}

pub fn steady_now<T: TimeSource>(clock: &T) -> SteadyTimePoint {
    SteadyTimePoint::from_micros(clock.now_us())
}

#[cfg(not(test))]
mod exports {
    use core::ffi::c_int;

    use libpicobridge::time::{SteadyTimePoint, Timespec};

    use crate::platform::Sdk;
    use crate::shims::errno;

    #[no_mangle]
    pub unsafe extern "C" fn clock_gettime(_clock_id: c_int, tp: *mut Timespec) -> c_int {
        // SAFETY: null or a valid out-pointer, per the POSIX contract
        errno::status(super::clock_gettime(&Sdk, unsafe { tp.as_mut() }))
    }

    #[no_mangle]
    pub unsafe extern "C" fn clock_getres(_clock_id: c_int, res: *mut Timespec) -> c_int {
        // SAFETY: as above
        errno::status(super::clock_getres(unsafe { res.as_mut() }))
    }

    #[no_mangle]
    pub unsafe extern "C" fn _nanosleep(
        requested: *const Timespec,
        remaining: *mut Timespec,
    ) -> c_int {
        // SAFETY: null or valid pointers, per the POSIX contract
        let (requested, remaining) = unsafe { (requested.as_ref(), remaining.as_mut()) };
        errno::status(super::nanosleep(&Sdk, requested, remaining))
    }

    /// `std::chrono::steady_clock::now()` из libc++, которого здесь нет.
    /// libc++'s steady clock, which the runtime links against.
    #[export_name = "_ZNSt3__16chrono12steady_clock3nowEv"]
    pub extern "C" fn steady_clock_now() -> SteadyTimePoint {
        super::steady_now(&Sdk)
    }
}
