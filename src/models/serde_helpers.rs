//! Serde helpers for the stored-note boundary
//!
//! Older editor builds saved a note as a bare pitch string (`"C4"`); newer
//! ones save `{ "pitch": "C4", "accidental": "sharp" }`. Both are read into
//! the single [`StoredNote`] representation here so nothing past the model
//! boundary ever sees the two shapes.

use serde::Deserialize;

use super::core::StoredNote;
use super::pitch::{Accidental, StaffPitch};

/// Every input shape a stored note can arrive in
#[derive(Deserialize)]
#[serde(untagged)]
pub enum StoredNoteShape {
    Legacy(StaffPitch),
    Tagged {
        pitch: StaffPitch,
        #[serde(default)]
        accidental: Option<Accidental>,
    },
}

impl From<StoredNoteShape> for StoredNote {
    fn from(shape: StoredNoteShape) -> Self {
        match shape {
            StoredNoteShape::Legacy(pitch) => StoredNote::natural(pitch),
            StoredNoteShape::Tagged { pitch, accidental } => {
                StoredNote::new(pitch, accidental.unwrap_or_default())
            }
        }
    }
}
