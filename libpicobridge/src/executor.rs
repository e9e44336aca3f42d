//! ExecutorRef — пара (identity, witness)
//!
//! `identity` — какой последовательный контекст исполнения.
//! `witness`  — какая таблица реализации (witness table) стоит за ним.
//! Младший бит `witness` зарезервирован под тег.
//!
//! Равенство определяется только по `identity`; `witness` нужен
//! лишь для диспетчеризации возможностей.
//! Equality is defined by `identity` alone; `witness` is carried for
//! capability dispatch only.

use core::ffi::c_void;

use bitflags::bitflags;

bitflags! {
    /// Теговые биты в младших разрядах witness / Tag bits in the witness word
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExecutorFlags: usize {
        /// Witness table валидна (обычный serial executor).
        const WITNESS_VALID = 1 << 0;
    }
}

/// Ссылка на executor в раскладке, которую ожидает рантайм.
/// Executor reference in the bit-packed layout the linked runtime expects.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct ExecutorRef {
    identity:          *mut c_void,
    witness_and_flags: usize,
}

impl ExecutorRef {
    /// Упаковать identity и witness, выставив тег валидности.
    /// Pack identity and witness, OR-ing in the validity tag.
    pub fn new(identity: *mut c_void, witness: *const c_void) -> Self {
        Self {
            identity,
            witness_and_flags: witness as usize | ExecutorFlags::WITNESS_VALID.bits(),
        }
    }

    pub fn identity(&self) -> *mut c_void {
        self.identity
    }

    /// Witness table без теговых битов / Witness table with tag bits masked off
    pub fn witness(&self) -> *const c_void {
        (self.witness_and_flags & !ExecutorFlags::all().bits()) as *const c_void
    }

    pub fn flags(&self) -> ExecutorFlags {
        ExecutorFlags::from_bits_truncate(self.witness_and_flags)
    }

    /// Тот же исключительный контекст исполнения?
    /// Same exclusive execution context?
    pub fn is_same_context(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl PartialEq for ExecutorRef {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_context(other)
    }
}

impl Eq for ExecutorRef {}
