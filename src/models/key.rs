//! The twelve keys offered by the editor
//!
//! Keys form a closed vocabulary: one spelling per chromatic semitone,
//! chosen the way the key selector lists them. Enharmonic aliases that are
//! not in the list (Db, Gb, A#...) are rejected rather than guessed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use super::key_signature::{self, KeySignature};
use super::pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Key {
    #[default]
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    Eb,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl Key {
    /// Keys in selector order (ascending semitone)
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::Cs,
        Key::D,
        Key::Eb,
        Key::E,
        Key::F,
        Key::Fs,
        Key::G,
        Key::Ab,
        Key::A,
        Key::Bb,
        Key::B,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::C => "C",
            Key::Cs => "C#",
            Key::D => "D",
            Key::Eb => "Eb",
            Key::E => "E",
            Key::F => "F",
            Key::Fs => "F#",
            Key::G => "G",
            Key::Ab => "Ab",
            Key::A => "A",
            Key::Bb => "Bb",
            Key::B => "B",
        }
    }

    /// Chromatic semitone of the tonic (C = 0)
    pub fn semitone(&self) -> u8 {
        *self as u8
    }

    pub fn prefers_flats(&self) -> bool {
        pitch::prefer_flats(self.as_str())
    }

    pub fn signature(&self) -> KeySignature {
        key_signature::key_signature(self.as_str())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Key {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case-insensitive parsing
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(Key::C),
            "C#" | "C♯" => Ok(Key::Cs),
            "D" => Ok(Key::D),
            "EB" | "E♭" => Ok(Key::Eb),
            "E" => Ok(Key::E),
            "F" => Ok(Key::F),
            "F#" | "F♯" => Ok(Key::Fs),
            "G" => Ok(Key::G),
            "AB" | "A♭" => Ok(Key::Ab),
            "A" => Ok(Key::A),
            "BB" | "B♭" => Ok(Key::Bb),
            "B" => Ok(Key::B),
            _ => Err(NotationError::UnknownKey(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semitones_ascend() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.semitone() as usize, i);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("C".parse::<Key>().unwrap(), Key::C);
        assert_eq!("f#".parse::<Key>().unwrap(), Key::Fs);
        assert_eq!("Bb".parse::<Key>().unwrap(), Key::Bb);
        assert_eq!("E♭".parse::<Key>().unwrap(), Key::Eb);
    }

    #[test]
    fn test_from_str_rejects_aliases() {
        assert_eq!("Db".parse::<Key>(), Err(NotationError::UnknownKey("Db".into())));
        assert!("A#".parse::<Key>().is_err());
        assert!("H".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for key in Key::ALL {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
    }

    #[test]
    fn test_prefers_flats() {
        let flat: Vec<Key> = Key::ALL.into_iter().filter(|k| k.prefers_flats()).collect();
        assert_eq!(flat, vec![Key::Eb, Key::F, Key::Ab, Key::Bb]);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Key::Fs).unwrap(), "\"F#\"");
        assert_eq!(serde_json::from_str::<Key>("\"Eb\"").unwrap(), Key::Eb);
    }
}
