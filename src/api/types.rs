//! Shared types for the WASM API
//!
//! Small result structures returned to JavaScript.

use serde::Serialize;

/// Where a click or drag put a note
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotePlacement {
    pub token_index: usize,
    pub pitch: String,
}

/// Outcome of a global key change
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct KeyChange {
    pub key: String,
    pub delta: i32,
}
