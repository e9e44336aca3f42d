//! Значения времени / Time values
//!
//! Единственный физический источник — свободно бегущий счётчик микросекунд.
//! The only physical source is a free-running microsecond counter.

use core::ffi::c_long;

use crate::{Error, Result};

pub const NANOS_PER_SEC:   i64 = 1_000_000_000;
pub const NANOS_PER_MICRO: u64 = 1_000;
pub const MICROS_PER_SEC:  u64 = 1_000_000;

/// `struct timespec` newlib: 64-битный `time_t`, `long` наносекунды.
/// newlib `struct timespec`: 64-bit `time_t`, `long` nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Timespec {
    pub tv_sec:  i64,
    pub tv_nsec: c_long,
}

impl Timespec {
    pub const ZERO: Self = Self { tv_sec: 0, tv_nsec: 0 };

    /// Разрешение счётчика — 1 мкс / Counter resolution, 1 µs
    pub const RESOLUTION: Self = Self { tv_sec: 0, tv_nsec: NANOS_PER_MICRO as c_long };

    pub const fn new(tv_sec: i64, tv_nsec: c_long) -> Self {
        Self { tv_sec, tv_nsec }
    }

    /// Разбить показание счётчика на секунды и наносекунды.
    /// Split a counter reading into seconds and nanoseconds.
    pub const fn from_micros(micros: u64) -> Self {
        Self {
            tv_sec:  (micros / MICROS_PER_SEC) as i64,
            tv_nsec: ((micros % MICROS_PER_SEC) * NANOS_PER_MICRO) as c_long,
        }
    }

    /// Отрицательные секунды или наносекунды вне `[0, 1e9)` недопустимы.
    /// Negative seconds or nanoseconds outside `[0, 1e9)` are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.tv_sec < 0 {
            return Err(Error::InvalidArgument);
        }
        if self.tv_nsec < 0 || self.tv_nsec as i64 >= NANOS_PER_SEC {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Длительность в микросекундах с округлением вверх.
    /// Duration in microseconds, rounded up.
    pub fn ceil_micros(&self) -> Result<u64> {
        self.validate()?;
        let nanos = (self.tv_sec as u64)
            .saturating_mul(NANOS_PER_SEC as u64)
            .saturating_add(self.tv_nsec as u64);
        let mut micros = nanos / NANOS_PER_MICRO;
        if nanos % NANOS_PER_MICRO != 0 {
            micros += 1;
        }
        Ok(micros)
    }
}

/// `std::chrono::steady_clock::time_point` — одно поле `int64_t` наносекунд.
/// Returned by value across the C ABI, so the layout is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(C)]
pub struct SteadyTimePoint {
    pub nanoseconds: i64,
}

impl SteadyTimePoint {
    pub const fn from_micros(micros: u64) -> Self {
        Self { nanoseconds: monotonic_nanos(micros) }
    }
}

/// Микросекунды счётчика → наносекунды монотонных часов.
/// Counter microseconds → monotonic nanoseconds.
pub const fn monotonic_nanos(micros: u64) -> i64 {
    let micros = if micros > i64::MAX as u64 { i64::MAX } else { micros as i64 };
    micros.saturating_mul(NANOS_PER_MICRO as i64)
}
