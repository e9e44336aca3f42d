//! Мост идентичности executor / Executor Identity Bridge
//!
//! Рантайм конкурентности спрашивает, совпадает ли текущий контекст с
//! executor задачи, чтобы не переключаться зря. Ядро одно, планировщика
//! ОС нет: любой executor здесь — единственный поток управления, так
//! что изоляция всегда гарантирована.
//!
//! With one core and no preemptive scheduler every executor is the only
//! thread of control. No state is kept between calls; the task queue and
//! run loop live in the linked runtime.

use core::ffi::c_void;

use libpicobridge::executor::ExecutorRef;

/// Ответ `isIsolatingCurrentContext` (`signed char` в C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Isolation {
    Unknown = -1,
    No      = 0,
    Yes     = 1,
}

/// Всегда изолирован / Always isolated
pub fn check_isolated(_executor: *const c_void) -> bool {
    true
}

/// Всегда `Yes`, никогда `Unknown`.
pub fn is_isolating_current_context(_executor: *const c_void) -> Isolation {
    Isolation::Yes
}

/// Сравниваются только identity; witness не участвует.
/// Only identities are compared; witness tables never take part.
pub fn is_same_exclusive_execution_context(left: *const c_void, right: *const c_void) -> bool {
    core::ptr::eq(left, right)
}

pub fn executor_ref(identity: *mut c_void, witness: *const c_void) -> ExecutorRef {
    ExecutorRef::new(identity, witness)
}

/// Первое машинное слово объекта — указатель на метаданные типа.
/// The object's first word is its type metadata pointer; null in, null out.
///
/// # Safety
/// A non-null `object` must point to a live heap object header.
pub unsafe fn object_type(object: *const c_void) -> *const c_void {
    if object.is_null() {
        return core::ptr::null();
    }
    // SAFETY: guaranteed by the caller
    unsafe { *object.cast::<*const c_void>() }
}

#[cfg(not(test))]
#[allow(non_snake_case)]
mod exports {
    use core::ffi::{c_int, c_schar, c_void};

    use libpicobridge::executor::ExecutorRef;

    #[no_mangle]
    pub extern "C" fn _task_serialExecutor_checkIsolated(
        executor: *mut c_void,
        _executor_type: *const c_void,
        _witness_table: *const c_void,
    ) -> c_int {
        super::check_isolated(executor) as c_int
    }

    #[no_mangle]
    pub extern "C" fn _task_serialExecutor_isIsolatingCurrentContext(
        executor: *mut c_void,
        _executor_type: *const c_void,
        _witness_table: *const c_void,
    ) -> c_schar {
        super::is_isolating_current_context(executor) as c_schar
    }

    #[no_mangle]
    pub extern "C" fn _task_serialExecutor_isSameExclusiveExecutionContext(
        left: *const c_void,
        right: *const c_void,
        _right_type: *const c_void,
        _witness_table: *const c_void,
    ) -> c_int {
        super::is_same_exclusive_execution_context(left, right) as c_int
    }

    #[no_mangle]
    pub extern "C" fn _task_serialExecutor_getExecutorRef(
        executor: *mut c_void,
        _executor_type: *const c_void,
        witness_table: *const c_void,
    ) -> ExecutorRef {
        super::executor_ref(executor, witness_table)
    }

    #[no_mangle]
    pub extern "C" fn _task_taskExecutor_getTaskExecutorRef(
        executor: *mut c_void,
        _executor_type: *const c_void,
        witness_table: *const c_void,
    ) -> ExecutorRef {
        super::executor_ref(executor, witness_table)
    }

    #[no_mangle]
    pub unsafe extern "C" fn swift_getObjectType(object: *const c_void) -> *const c_void {
        // SAFETY: the runtime only passes heap objects or null
        unsafe { super::object_type(object) }
    }
}
