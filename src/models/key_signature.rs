//! Key signature registry
//!
//! Static tables: key name → signature, and accidental type → the ordered
//! treble-staff positions that receive signature marks.

use serde::{Deserialize, Serialize};

use super::pitch::{Letter, StaffPitch};

/// X of the first signature mark, right after the clef
pub const KEY_SIGNATURE_START_X: f32 = 104.0;

/// Horizontal distance between consecutive marks
pub const KEY_SIGNATURE_MARK_SPACING: f32 = 12.0;

const MAX_MARKS: u8 = 7;

/// Order of sharps on the treble staff: F C G D A E B
const SHARP_POSITIONS: [StaffPitch; 7] = [
    StaffPitch { letter: Letter::F, octave: 5 },
    StaffPitch { letter: Letter::C, octave: 5 },
    StaffPitch { letter: Letter::G, octave: 5 },
    StaffPitch { letter: Letter::D, octave: 5 },
    StaffPitch { letter: Letter::A, octave: 4 },
    StaffPitch { letter: Letter::E, octave: 5 },
    StaffPitch { letter: Letter::B, octave: 4 },
];

/// Order of flats on the treble staff: B E A D G C F
const FLAT_POSITIONS: [StaffPitch; 7] = [
    StaffPitch { letter: Letter::B, octave: 4 },
    StaffPitch { letter: Letter::E, octave: 5 },
    StaffPitch { letter: Letter::A, octave: 4 },
    StaffPitch { letter: Letter::D, octave: 5 },
    StaffPitch { letter: Letter::G, octave: 4 },
    StaffPitch { letter: Letter::C, octave: 5 },
    StaffPitch { letter: Letter::F, octave: 4 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureType {
    #[default]
    None,
    Sharp,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeySignature {
    #[serde(rename = "type")]
    pub kind: SignatureType,
    pub count: u8,
}

impl KeySignature {
    const fn sharps(count: u8) -> Self {
        Self { kind: SignatureType::Sharp, count }
    }

    const fn flats(count: u8) -> Self {
        Self { kind: SignatureType::Flat, count }
    }

    /// Staff positions of the marks, left to right
    pub fn positions(&self) -> &'static [StaffPitch] {
        let count = self.count.min(MAX_MARKS) as usize;
        match self.kind {
            SignatureType::None => &[],
            SignatureType::Sharp => &SHARP_POSITIONS[..count],
            SignatureType::Flat => &FLAT_POSITIONS[..count],
        }
    }
}

/// Look up the signature of a key by name. Unknown names get no signature.
pub fn key_signature(key: &str) -> KeySignature {
    match key.trim() {
        "C" => KeySignature::default(),
        "G" => KeySignature::sharps(1),
        "D" => KeySignature::sharps(2),
        "A" => KeySignature::sharps(3),
        "E" => KeySignature::sharps(4),
        "B" => KeySignature::sharps(5),
        "F#" => KeySignature::sharps(6),
        "C#" => KeySignature::sharps(7),
        "F" => KeySignature::flats(1),
        "Bb" => KeySignature::flats(2),
        "Eb" => KeySignature::flats(3),
        "Ab" => KeySignature::flats(4),
        _ => {
            log::debug!("No signature for key '{}', drawing none", key);
            KeySignature::default()
        }
    }
}

/// X of the `index`-th signature mark
pub fn mark_x(index: usize) -> f32 {
    KEY_SIGNATURE_START_X + index as f32 * KEY_SIGNATURE_MARK_SPACING
}

/// Horizontal space reserved after the clef so tokens clear the signature
pub fn key_signature_offset(key: &str) -> f32 {
    key_signature(key).count.min(MAX_MARKS) as f32 * KEY_SIGNATURE_MARK_SPACING
}
