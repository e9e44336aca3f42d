//! libpicobridge — типы и ABI-раскладки PicoBridge
//!
//! Чистые данные без внешних символов: всё, что здесь лежит, можно
//! тестировать на хосте.
//! Pure data with no extern symbols: everything here is host-testable.
//!
//! Модули / Modules:
//!   time     — Timespec, SteadyTimePoint, округление до микросекунд
//!   executor — ExecutorRef (identity + witness)
//!   cyw43    — раскладка состояния радио-драйвера / radio driver layout
//!   netcfg   — конфигурация сетевого стека / network stack build switches
//!   fmt      — форматирование и разбор f64 / f64 formatting and parsing

#![cfg_attr(not(test), no_std)]

pub mod cyw43;
pub mod executor;
pub mod fmt;
pub mod netcfg;
pub mod time;

/// Значения errno из newlib / newlib errno values
pub const EINVAL: i32 = 22;
pub const ERANGE: i32 = 34;
pub const EIO:    i32 = 5;

/// Ошибки PicoBridge / PicoBridge errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Нулевой указатель или значение вне диапазона.
    /// Null output pointer or out-of-range input.
    InvalidArgument,
    /// Запрошено больше, чем помещается; операция выполнена усечённо.
    /// Requested more than fits; the truncated operation was performed.
    Range,
    /// Приёмник вывода отказал / Output sink refused a byte
    Io,
    /// Код ошибки Pico SDK / Pico SDK error code
    Sdk(PicoError),
}

impl Error {
    /// Значение для ячейки errno / Value for the errno cell
    pub const fn errno(self) -> i32 {
        match self {
            Error::InvalidArgument => EINVAL,
            Error::Range           => ERANGE,
            Error::Io | Error::Sdk(_) => EIO,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

/// `pico_error_codes` из Pico SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PicoError {
    Generic,
    Timeout,
    NoData,
    NotPermitted,
    InvalidArgument,
    Io,
    BadAuth,
    ConnectFailed,
    InsufficientResources,
    InvalidAddress,
    BadAlignment,
    InvalidState,
    BufferTooSmall,
    PreconditionNotMet,
    ModifiedData,
    InvalidData,
    NotFound,
    UnsupportedModification,
    LockRequired,
    VersionMismatch,
    ResourceInUse,
    Unknown(i32),
}

impl PicoError {
    pub const fn from_code(code: i32) -> Self {
        match code {
            -1  => PicoError::Generic,
            -2  => PicoError::Timeout,
            -3  => PicoError::NoData,
            -4  => PicoError::NotPermitted,
            -5  => PicoError::InvalidArgument,
            -6  => PicoError::Io,
            -7  => PicoError::BadAuth,
            -8  => PicoError::ConnectFailed,
            -9  => PicoError::InsufficientResources,
            -10 => PicoError::InvalidAddress,
            -11 => PicoError::BadAlignment,
            -12 => PicoError::InvalidState,
            -13 => PicoError::BufferTooSmall,
            -14 => PicoError::PreconditionNotMet,
            -15 => PicoError::ModifiedData,
            -16 => PicoError::InvalidData,
            -17 => PicoError::NotFound,
            -18 => PicoError::UnsupportedModification,
            -19 => PicoError::LockRequired,
            -20 => PicoError::VersionMismatch,
            -21 => PicoError::ResourceInUse,
            other => PicoError::Unknown(other),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            PicoError::Generic                 => -1,
            PicoError::Timeout                 => -2,
            PicoError::NoData                  => -3,
            PicoError::NotPermitted            => -4,
            PicoError::InvalidArgument         => -5,
            PicoError::Io                      => -6,
            PicoError::BadAuth                 => -7,
            PicoError::ConnectFailed           => -8,
            PicoError::InsufficientResources   => -9,
            PicoError::InvalidAddress          => -10,
            PicoError::BadAlignment            => -11,
            PicoError::InvalidState            => -12,
            PicoError::BufferTooSmall          => -13,
            PicoError::PreconditionNotMet      => -14,
            PicoError::ModifiedData            => -15,
            PicoError::InvalidData             => -16,
            PicoError::NotFound                => -17,
            PicoError::UnsupportedModification => -18,
            PicoError::LockRequired            => -19,
            PicoError::VersionMismatch         => -20,
            PicoError::ResourceInUse           => -21,
            PicoError::Unknown(code)           => code,
        }
    }

    /// `PICO_OK` (0) → Ok, иначе Err / otherwise Err.
    pub const fn check(code: i32) -> Result<()> {
        if code == 0 {
            Ok(())
        } else {
            Err(Error::Sdk(PicoError::from_code(code)))
        }
    }
}
