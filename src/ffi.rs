//! FFI bindings for the FocusFlow engine
//!
//! This module provides C-compatible functions for calling the engine from
//! other languages. All functions take and return null-terminated JSON
//! strings; returned memory must be freed with `focusflow_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{
    cognitive_refresh_json, distraction_alert_json, fullscreen_violation_json,
    room_moderation_json, score_session_json,
};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared wrapper: parse the argument, run the evaluation, return JSON
unsafe fn evaluate(
    json: *const c_char,
    f: fn(&str) -> Result<String, crate::EngineError>,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match f(&json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score an end-of-session telemetry request and return report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with
///   `focusflow_free_string`.
/// - Returns NULL on error; call `focusflow_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn focusflow_score_session(json: *const c_char) -> *mut c_char {
    evaluate(json, score_session_json)
}

/// Evaluate a distraction checkpoint request and return report JSON.
///
/// # Safety
/// Same contract as [`focusflow_score_session`].
#[no_mangle]
pub unsafe extern "C" fn focusflow_distraction_alert(json: *const c_char) -> *mut c_char {
    evaluate(json, distraction_alert_json)
}

/// Evaluate a fullscreen violation request and return report JSON.
///
/// # Safety
/// Same contract as [`focusflow_score_session`].
#[no_mangle]
pub unsafe extern "C" fn focusflow_fullscreen_violation(json: *const c_char) -> *mut c_char {
    evaluate(json, fullscreen_violation_json)
}

/// Evaluate a study room moderation request and return report JSON.
///
/// # Safety
/// Same contract as [`focusflow_score_session`].
#[no_mangle]
pub unsafe extern "C" fn focusflow_room_moderation(json: *const c_char) -> *mut c_char {
    evaluate(json, room_moderation_json)
}

/// Evaluate a cognitive refresh request and return report JSON.
///
/// # Safety
/// Same contract as [`focusflow_score_session`].
#[no_mangle]
pub unsafe extern "C" fn focusflow_cognitive_refresh(json: *const c_char) -> *mut c_char {
    evaluate(json, cognitive_refresh_json)
}

/// Get the last error message, or NULL if the last call succeeded.
///
/// # Safety
/// The returned pointer is owned by the engine and valid until the next
/// engine call on this thread; do not free it.
#[no_mangle]
pub unsafe extern "C" fn focusflow_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(msg) => msg.as_ptr(),
        None => ptr::null(),
    })
}

/// Free a string returned by an engine function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by an engine function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn focusflow_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Engine version as a static C string.
#[no_mangle]
pub extern "C" fn focusflow_version() -> *const c_char {
    // Trailing NUL baked in at compile time
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
