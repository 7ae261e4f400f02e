//! C-ABI wrapper around `todo-core`.
//!
//! # Overview
//! Exposes a todo widget session through `extern "C"` functions so a
//! presentation host written in any language with a C FFI can forward user
//! intents and read back the state it needs to redraw.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One function per intent mirrors the core `Session` API 1:1.
//! - Ids travel as hyphenated UUID strings; field names as `"title"` /
//!   `"description"`.
//! - The C caller owns all returned pointers and must call the matching
//!   `todo_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use todo_core::{Field, IntentError, Session, SessionConfig, TodoId};

use types::*;

/// Read a C string argument as UTF-8, lossily.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string.
unsafe fn read_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

/// Parse a C string argument as a `TodoId`.
///
/// # Safety
/// Same contract as `read_str`.
unsafe fn read_id(s: *const c_char) -> Result<TodoId, IntentError> {
    unsafe { read_str(s) }.parse()
}

/// Run an intent that only reports a status code.
fn with_session(
    session: *mut FfiTodoSession,
    f: impl FnOnce(&mut Session) -> FfiErrorCode,
) -> FfiErrorCode {
    if session.is_null() {
        return FfiErrorCode::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let session = unsafe { &mut *session };
        f(&mut session.inner)
    }))
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Create a new, empty session.
///
/// `prefill_on_edit` makes `todo_session_begin_edit` load the target item's
/// fields into the draft. Returns null if an internal panic occurs.
/// The caller must free the returned pointer with `todo_session_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_new(
    id_strategy: FfiIdStrategy,
    prefill_on_edit: bool,
) -> *mut FfiTodoSession {
    catch_unwind(|| {
        let config = SessionConfig {
            id_strategy: id_strategy.into(),
            prefill_on_edit,
        };
        Box::into_raw(Box::new(FfiTodoSession {
            inner: Session::new(config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a session created by `todo_session_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_free(session: *mut FfiTodoSession) {
    if !session.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(session) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// Flip completion of the item with `id`. Unknown ids are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_toggle(
    session: *mut FfiTodoSession,
    id: *const c_char,
) -> FfiErrorCode {
    if id.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| match unsafe { read_id(id) } {
        Ok(id) => {
            s.toggle(id);
            FfiErrorCode::Ok
        }
        Err(e) => FfiErrorCode::from(&e),
    })
}

/// Make `id` the editing target; the next submit updates it.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_edit(
    session: *mut FfiTodoSession,
    id: *const c_char,
) -> FfiErrorCode {
    if id.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| match unsafe { read_id(id) } {
        Ok(id) => {
            s.begin_edit(id);
            FfiErrorCode::Ok
        }
        Err(e) => FfiErrorCode::from(&e),
    })
}

/// Delete the item with `id`. Deleting the editing target cancels the edit.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_delete(
    session: *mut FfiTodoSession,
    id: *const c_char,
) -> FfiErrorCode {
    if id.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| match unsafe { read_id(id) } {
        Ok(id) => {
            s.delete(id);
            FfiErrorCode::Ok
        }
        Err(e) => FfiErrorCode::from(&e),
    })
}

/// Set draft field `field` (`"title"` or `"description"`) to `value`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_field_change(
    session: *mut FfiTodoSession,
    field: *const c_char,
    value: *const c_char,
) -> FfiErrorCode {
    if field.is_null() || value.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| {
        match unsafe { read_str(field) }.parse::<Field>() {
            Ok(field) => {
                s.field_change(field, unsafe { read_str(value) });
                FfiErrorCode::Ok
            }
            Err(e) => FfiErrorCode::from(&e),
        }
    })
}

/// Validate the draft and add or update accordingly.
///
/// Never returns null. The caller must free the result with
/// `todo_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_submit(session: *mut FfiTodoSession) -> *mut FfiSubmitResult {
    if session.is_null() {
        return FfiSubmitResult::null_arg("session");
    }
    catch_unwind(AssertUnwindSafe(|| {
        let session = unsafe { &mut *session };
        match session.inner.submit() {
            Ok(outcome) => FfiSubmitResult::from_outcome(outcome),
            Err(e) => FfiSubmitResult::from_validation(e),
        }
    }))
    .unwrap_or_else(|_| FfiSubmitResult::panic("panic in todo_session_submit"))
}

// ---------------------------------------------------------------------------
// State for rendering
// ---------------------------------------------------------------------------

/// Copy the ordered item list.
///
/// Returns null if `session` is null. Free with `todo_free_list`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_items(session: *const FfiTodoSession) -> *mut FfiTodoList {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        FfiTodoList::from_items(session.inner.items())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Id of the item being edited, or null in add mode.
///
/// Free a non-null result with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_editing_target(session: *const FfiTodoSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        match session.inner.editing_target() {
            Some(id) => c_string(id.to_string()),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Full render state (items, draft, errors, mode, labels) as a JSON string.
///
/// Returns null if `session` is null or serialization fails.
/// Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_snapshot_json(session: *const FfiTodoSession) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        match session.inner.snapshot().to_json() {
            Ok(json) => c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiSubmitResult` returned by `todo_session_submit`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_result(result: *mut FfiSubmitResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        for s in [
            result.error_message,
            result.id,
            result.title_error,
            result.description_error,
        ] {
            if !s.is_null() {
                drop(unsafe { CString::from_raw(s) });
            }
        }
    });
}

/// Free an `FfiTodoList` returned by `todo_session_items`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_list(list: *mut FfiTodoList) {
    if list.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let list = unsafe { Box::from_raw(list) };
        if !list.items.is_null() && list.len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    list.items,
                    list.len as usize,
                ))
            };
            for item in items.iter() {
                free_ffi_todo_fields(item);
            }
        }
    });
}

/// Free the C-string fields of an `FfiTodo` (but not the struct itself).
fn free_ffi_todo_fields(todo: &FfiTodo) {
    for s in [todo.id, todo.title, todo.description] {
        if !s.is_null() {
            drop(unsafe { CString::from_raw(s) });
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
