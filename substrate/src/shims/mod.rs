//! Заглушки POSIX-окружения / Host-environment shims
//!
//! Операционной системы нет, а переносимый код слинкованных библиотек
//! ожидает errno, memset_s и fputs/stderr. Здесь — минимальные замены.
//! No OS is present, yet the linked libraries' portable code expects
//! errno, memset_s and fputs/stderr. These are the minimal stand-ins.

pub mod errno;
pub mod float;
pub mod memset;
pub mod stdio;
