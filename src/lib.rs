//! Choral Staff WASM Module
//!
//! Core of a choral sheet-music editor: lyric syllables carrying chord
//! symbols and one note per voice, drawn on a single treble staff and
//! transposable between keys.

pub mod error;
pub mod models;
pub mod renderers;
pub mod transposition;
pub mod api;

// Re-export commonly used types
pub use error::{NotationError, Result};
pub use models::core::*;
pub use models::{Accidental, EditorSession, Key, KeySignature, Letter, NoteName, StaffPitch};
pub use renderers::StaffGeometry;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // a second init only fails because a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Choral staff WASM module initialized");
}
