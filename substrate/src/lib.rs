//! picobridge-substrate — связующий слой для RP2350 / glue layer for the RP2350
//!
//! Всё, что касается символов линковщика: экспорт для рантайма
//! конкурентности, мост радио-драйвер ↔ сетевой стек, заглушки POSIX.
//! Everything that touches a linker symbol lives here.
//!
//! Модули / Modules:
//!   time     — часы и nanosleep поверх `time_us_64`
//!   executor — мост идентичности executor для рантайма
//!   radio    — дескриптор CYW43, вызовы стека в драйвер, сканирование
//!   shims    — errno, memset_s, fputs/stderr, f64 для стека
//!   console  — stdio SDK, `pprint!`, бэкенд `log`
//!   http     — ответ HTTP с фиксированным форматом (feature `http`)
//!   platform — символы Pico SDK и их тестовые двойники

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod console;
pub mod executor;
#[cfg(feature = "http")]
pub mod http;
pub mod platform;
pub mod radio;
pub mod shims;
pub mod time;

pub use libpicobridge::{Error, Result};
