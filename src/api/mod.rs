//! WASM API module
//!
//! JavaScript-facing surface: the `ChoralEditor` handle plus a few stateless
//! helpers the page uses while drawing.

pub mod helpers;
pub mod types;
pub mod core;

pub use self::core::ChoralEditor;
pub use types::{KeyChange, NotePlacement};

use wasm_bindgen::prelude::*;

use crate::models::{key_signature, Key, VoiceType};
use crate::renderers::StaffGeometry;
use crate::transposition;

/// Transpose a chord symbol by `delta` semitones.
///
/// Text that does not start with a note name is returned unchanged.
#[wasm_bindgen(js_name = transposeChord)]
pub fn transpose_chord(chord: &str, delta: i32, prefer_flats: bool) -> String {
    transposition::transpose_chord(chord, delta, prefer_flats)
}

/// Y coordinates of the ledger lines a note at `y` needs
#[wasm_bindgen(js_name = ledgerLines)]
pub fn ledger_lines(y: f32) -> Vec<f32> {
    StaffGeometry::default().ledger_lines(y)
}

/// Key signature of a key name as `{ type, count }`
#[wasm_bindgen(js_name = keySignature)]
pub fn key_signature(key: &str) -> Result<JsValue, JsValue> {
    helpers::serialize(&key_signature::key_signature(key), "Key signature serialization error")
}

/// The selectable keys, in chromatic order
#[wasm_bindgen(js_name = keys)]
pub fn keys() -> js_sys::Array {
    Key::ALL.iter().map(|k| JsValue::from_str(k.as_str())).collect()
}

#[wasm_bindgen(js_name = voiceTypes)]
pub fn voice_types() -> js_sys::Array {
    VoiceType::ALL.iter().map(|v| JsValue::from_str(v.label())).collect()
}
