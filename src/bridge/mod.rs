//! FFI Bridge: C-ABI surface for host runtimes (web backend, game client).
//!
//! Records cross the boundary as JSON. Every returned string is heap-allocated
//! by Rust and must be released with `hatchery_free_string`. On failure a
//! function returns null and the message is available from
//! `hatchery_last_error` on the same thread.

use serde::Serialize;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::breeding::session_hash;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::record::CreatureRecord;

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_last_error(message: String) {
    tracing::warn!(target: "hatchery_core::bridge", error = %message, "ffi call failed");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

// ========================
// Helpers
// ========================

fn json_to_cstring<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(e) => {
            set_last_error(format!("serialization failed: {e}"));
            std::ptr::null_mut()
        }
    }
}

fn parse_cstr(ptr: *const c_char, what: &str) -> Option<String> {
    if ptr.is_null() {
        set_last_error(format!("{what} is null"));
        return None;
    }
    match unsafe { CStr::from_ptr(ptr) }.to_str() {
        Ok(s) => Some(s.to_owned()),
        Err(_) => {
            set_last_error(format!("{what} is not valid UTF-8"));
            None
        }
    }
}

fn parse_creature(ptr: *const c_char, what: &str) -> Option<CreatureRecord> {
    let json = parse_cstr(ptr, what)?;
    match serde_json::from_str(&json) {
        Ok(record) => Some(record),
        Err(e) => {
            set_last_error(format!("{what} is not a creature record: {e}"));
            None
        }
    }
}

fn respond<T: Serialize>(result: Result<T, EngineError>) -> *mut c_char {
    match result {
        Ok(value) => {
            clear_last_error();
            json_to_cstring(&value)
        }
        Err(e) => {
            set_last_error(e.to_string());
            std::ptr::null_mut()
        }
    }
}

// ========================
// C-ABI: Core
// ========================

/// Crate version string
#[no_mangle]
pub extern "C" fn hatchery_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION"))
        .unwrap_or_default()
        .into_raw()
}

/// Free a string allocated by Rust. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Message of the last failed call on this thread, or null if it succeeded
#[no_mangle]
pub extern "C" fn hatchery_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| match slot.borrow().as_deref() {
        Some(message) => CString::new(message).unwrap_or_default().into_raw(),
        None => std::ptr::null_mut(),
    })
}

// ========================
// C-ABI: Generation
// ========================

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_generate_creature(hash: *const c_char) -> *mut c_char {
    let Some(hash) = parse_cstr(hash, "hash") else {
        return std::ptr::null_mut();
    };
    respond(Engine::standard().generate_creature(&hash))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_generate_encounter(
    environment: *const c_char,
    hash: *const c_char,
) -> *mut c_char {
    let Some(environment) = parse_cstr(environment, "environment") else {
        return std::ptr::null_mut();
    };
    let Some(hash) = parse_cstr(hash, "hash") else {
        return std::ptr::null_mut();
    };
    respond(Engine::standard().generate_wild_encounter(&environment, &hash))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_generate_item(
    environment: *const c_char,
    hash: *const c_char,
) -> *mut c_char {
    let Some(environment) = parse_cstr(environment, "environment") else {
        return std::ptr::null_mut();
    };
    let Some(hash) = parse_cstr(hash, "hash") else {
        return std::ptr::null_mut();
    };
    respond(Engine::standard().generate_item(&environment, &hash))
}

// ========================
// C-ABI: Breeding
// ========================

/// Breed two creature records (JSON) under a session hash; returns the
/// detailed outcome (offspring plus per-trait resolutions).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_breed(
    parent_a_json: *const c_char,
    parent_b_json: *const c_char,
    session_hash: *const c_char,
) -> *mut c_char {
    let Some(parent_a) = parse_creature(parent_a_json, "parent_a") else {
        return std::ptr::null_mut();
    };
    let Some(parent_b) = parse_creature(parent_b_json, "parent_b") else {
        return std::ptr::null_mut();
    };
    let Some(session) = parse_cstr(session_hash, "session_hash") else {
        return std::ptr::null_mut();
    };
    respond(Engine::standard().breed_detailed(&parent_a, &parent_b, &session))
}

/// Derive a breeding session hash from two parents and a salt string.
/// Returns the hash as a JSON string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn hatchery_session_hash(
    parent_a_json: *const c_char,
    parent_b_json: *const c_char,
    salt: *const c_char,
) -> *mut c_char {
    let Some(parent_a) = parse_creature(parent_a_json, "parent_a") else {
        return std::ptr::null_mut();
    };
    let Some(parent_b) = parse_creature(parent_b_json, "parent_b") else {
        return std::ptr::null_mut();
    };
    let Some(salt) = parse_cstr(salt, "salt") else {
        return std::ptr::null_mut();
    };
    respond(Ok(session_hash(&parent_a, &parent_b, salt.as_bytes())))
}

// ========================
// C-ABI: Audit
// ========================

#[no_mangle]
pub extern "C" fn hatchery_rarity_census(samples: u64, seed: u64) -> *mut c_char {
    respond(Engine::standard().rarity_census(samples, seed))
}
