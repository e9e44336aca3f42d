//! Ответ HTTP через сетевой стек / HTTP reply through the network stack
//!
//! `mg_http_reply` принимает printf-формат. Тело всегда идёт через
//! фиксированный `"%s"`, чтобы `%` в нём не разбирался как формат.
//! The body always goes through a fixed `"%s"` so a `%` inside it is
//! never read as a conversion.

use core::ffi::{c_char, c_int, CStr};
use core::ptr::NonNull;

/// `struct mg_connection` — только по указателю / pointer-only
#[repr(C)]
pub struct MgConnection {
    _opaque: [u8; 0],
}

#[cfg(not(test))]
mod stack {
    use core::ffi::{c_char, c_int};

    use super::MgConnection;

    extern "C" {
        pub fn mg_http_reply(
            conn: *mut MgConnection,
            status: c_int,
            headers: *const c_char,
            fmt: *const c_char,
            ...
        );
    }
}


/// Отправить ответ / Send a reply
///
/// # Safety
/// `conn` must be a live connection owned by the stack's event loop.
pub unsafe fn reply(conn: NonNull<MgConnection>, status: c_int, headers: &CStr, body: &CStr) {
    // SAFETY: guaranteed by the caller; all strings outlive the call
    unsafe {
        stack::mg_http_reply(
            conn.as_ptr(),
            status,
            headers.as_ptr(),
            c"%s".as_ptr(),
            body.as_ptr(),
        )
    };
}

fn c_str_or_empty<'a>(text: *const c_char) -> &'a CStr {
    if text.is_null() {
        c""
    } else {
        // SAFETY: non-null strings from C are NUL-terminated
        unsafe { CStr::from_ptr(text) }
    }
}

#[cfg(not(test))]
mod exports {
    use core::ffi::{c_char, c_int};
    use core::ptr::NonNull;

    use super::MgConnection;

    /// Нулевой `headers`/`body` — пустая строка; нулевое соединение — ничего.
    /// Null headers/body become empty strings; a null connection is ignored.
    #[no_mangle]
    pub unsafe extern "C" fn mg_bridge_http_reply(
        conn: *mut MgConnection,
        status: c_int,
        headers: *const c_char,
        body: *const c_char,
    ) {
        let Some(conn) = NonNull::new(conn) else {
            return;
        };
        let (headers, body) = (super::c_str_or_empty(headers), super::c_str_or_empty(body));
        // SAFETY: the stack hands its own live connection to the caller
        unsafe { super::reply(conn, status, headers, body) };
    }
}
