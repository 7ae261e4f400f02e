//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use todo_core::{
    Field, IdStrategy, IntentError, Session, SubmitOutcome, TodoItem, ValidationError,
};

/// Opaque handle to a `Session`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiTodoSession {
    pub(crate) inner: Session,
}

/// Owned C string from Rust text. Interior NULs are stripped rather than
/// failing the whole call.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let s: String = s.into();
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(e) => {
            let mut bytes = e.into_vec();
            bytes.retain(|b| *b != 0);
            CString::new(bytes).unwrap_or_default().into_raw()
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Identifier strategy as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum FfiIdStrategy {
    Sequential = 0,
    Random = 1,
}

impl From<FfiIdStrategy> for IdStrategy {
    fn from(s: FfiIdStrategy) -> Self {
        match s {
            FfiIdStrategy::Sequential => IdStrategy::Sequential,
            FfiIdStrategy::Random => IdStrategy::Random,
        }
    }
}

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Error codes returned by intent functions and in `FfiSubmitResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    InvalidId = 2,
    UnknownField = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<&IntentError> for FfiErrorCode {
    fn from(e: &IntentError) -> Self {
        match e {
            IntentError::UnknownField(_) => FfiErrorCode::UnknownField,
            IntentError::InvalidId(_) => FfiErrorCode::InvalidId,
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub completed: bool,
}

impl From<&TodoItem> for FfiTodo {
    fn from(item: &TodoItem) -> Self {
        FfiTodo {
            id: c_string(item.id.to_string()),
            title: c_string(item.title.as_str()),
            description: c_string(item.description.as_str()),
            completed: item.completed,
        }
    }
}

/// The ordered collection exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

impl FfiTodoList {
    /// Copy the session's items into a heap-allocated `FfiTodoList`.
    pub(crate) fn from_items(items: &[TodoItem]) -> *mut Self {
        let len = items.len() as u32;
        let ffi_items: Vec<FfiTodo> = items.iter().map(FfiTodo::from).collect();

        let items = if ffi_items.is_empty() {
            std::ptr::null_mut()
        } else {
            // Exact capacity so the free side can rebuild with (len, len).
            let mut boxed = ffi_items.into_boxed_slice();
            let ptr = boxed.as_mut_ptr();
            std::mem::forget(boxed);
            ptr
        };

        Box::into_raw(Box::new(FfiTodoList { items, len }))
    }
}

// ---------------------------------------------------------------------------
// Submit result
// ---------------------------------------------------------------------------

/// What a submit did, as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiSubmitKind {
    /// The submit was rejected or never ran.
    None = 0,
    Added = 1,
    Updated = 2,
    Missing = 3,
}

/// Result envelope for `todo_session_submit`.
///
/// On success `error_code` is `Ok`, `kind` says what happened and `id` holds
/// the affected item's id. On a validation failure `error_code` is
/// `Validation`, `kind` is `None`, and each of `title_error` /
/// `description_error` is either null or the message for that field.
#[repr(C)]
pub struct FfiSubmitResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub kind: FfiSubmitKind,
    pub id: *mut c_char,
    pub title_error: *mut c_char,
    pub description_error: *mut c_char,
}

impl FfiSubmitResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        kind: FfiSubmitKind,
        id: *mut c_char,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiSubmitResult {
            error_code,
            error_message,
            kind,
            id,
            title_error: std::ptr::null_mut(),
            description_error: std::ptr::null_mut(),
        }))
    }

    /// Build a success result from a core `SubmitOutcome`.
    pub(crate) fn from_outcome(outcome: SubmitOutcome) -> *mut Self {
        let (kind, id) = match outcome {
            SubmitOutcome::Added(id) => (FfiSubmitKind::Added, id),
            SubmitOutcome::Updated(id) => (FfiSubmitKind::Updated, id),
            SubmitOutcome::Missing(id) => (FfiSubmitKind::Missing, id),
        };
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            kind,
            c_string(id.to_string()),
        )
    }

    /// Build a rejected result carrying the per-field messages.
    pub(crate) fn from_validation(err: ValidationError) -> *mut Self {
        let field_message = |field: Field| {
            err.message(field)
                .map(c_string)
                .unwrap_or(std::ptr::null_mut())
        };
        let title_error = field_message(Field::Title);
        let description_error = field_message(Field::Description);

        let result = Self::boxed(
            FfiErrorCode::Validation,
            c_string(err.to_string()),
            FfiSubmitKind::None,
            std::ptr::null_mut(),
        );
        // SAFETY: `result` was just allocated by `boxed` and is not shared.
        unsafe {
            (*result).title_error = title_error;
            (*result).description_error = description_error;
        }
        result
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(format!("null argument: {name}")),
            FfiSubmitKind::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg),
            FfiSubmitKind::None,
            std::ptr::null_mut(),
        )
    }
}
