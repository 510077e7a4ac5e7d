//! Shared helpers for WASM API operations
//!
//! Console logging, serialization across the JS boundary, and parsing of the
//! loosely-typed arguments JavaScript hands us.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::NotationError;
use crate::models::{Accidental, VoiceId, VoiceType};

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value for JavaScript.
///
/// Maps become plain objects and `None` becomes `null`, so empty note slots
/// survive the trip.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Convert a core error into a JS error value, logging it on the way
pub fn to_js_error(err: NotationError) -> JsValue {
    wasm_error!("{}", err);
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Argument Parsing
// ============================================================================

pub fn voice_id(id: &str) -> VoiceId {
    VoiceId::new(id)
}

/// Accidental from its JS name; empty string and "none" both clear it
pub fn parse_accidental(name: &str) -> Result<Accidental, JsValue> {
    match name.trim().to_lowercase().as_str() {
        "" | "none" | "natural" => Ok(Accidental::None),
        "sharp" | "#" => Ok(Accidental::Sharp),
        "flat" | "b" => Ok(Accidental::Flat),
        other => Err(JsValue::from_str(&format!("Unknown accidental: '{}'", other))),
    }
}

pub fn parse_voice_type(name: &str) -> Result<VoiceType, JsValue> {
    name.parse::<VoiceType>().map_err(to_js_error)
}
