//! Chord symbol grammar and transposition
//!
//! A chord is `root [quality] [/bass]`:
//! - root and bass are a letter with at most one accidental (`C`, `F#`, `Bb`)
//! - quality is whatever sits between them (`m7`, `sus4`, `maj7(#11)`),
//!   carried through untouched
//!
//! A slash whose tail is not a note name belongs to the quality (`C6/9`).
//! Text that does not start with a root is free text and is never rewritten.

use std::fmt;
use std::str::FromStr;

use crate::error::{NotationError, Result};
use crate::models::pitch::{spell_name, NoteName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub root: NoteName,
    pub quality: String,
    pub bass: Option<NoteName>,
}

impl Chord {
    /// Shift root and bass by `delta` semitones and re-spell both
    pub fn transposed(&self, delta: i32, prefer_flats: bool) -> Chord {
        Chord {
            root: transpose_name(self.root, delta, prefer_flats),
            quality: self.quality.clone(),
            bass: self.bass.map(|b| transpose_name(b, delta, prefer_flats)),
        }
    }
}

impl FromStr for Chord {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        let (root, used) =
            NoteName::parse_prefix(s).ok_or_else(|| NotationError::UnparseableChord(s.to_string()))?;
        let rest = &s[used..];

        if let Some(slash) = rest.rfind('/') {
            if let Ok(bass) = rest[slash + 1..].parse::<NoteName>() {
                return Ok(Chord {
                    root,
                    quality: rest[..slash].to_string(),
                    bass: Some(bass),
                });
            }
        }

        Ok(Chord {
            root,
            quality: rest.to_string(),
            bass: None,
        })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

fn transpose_name(name: NoteName, delta: i32, prefer_flats: bool) -> NoteName {
    let semitone = (name.semitone() as i32 + delta).rem_euclid(12) as u8;
    spell_name(semitone, prefer_flats)
}

/// Transpose chord text. Empty or free text comes back unchanged.
pub fn transpose_chord(text: &str, delta: i32, prefer_flats: bool) -> String {
    if text.is_empty() || delta.rem_euclid(12) == 0 {
        return text.to_string();
    }

    match text.parse::<Chord>() {
        Ok(chord) => chord.transposed(delta, prefer_flats).to_string(),
        Err(e) => {
            log::debug!("{}; leaving chord text as is", e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::{Accidental, Letter};

    #[test]
    fn test_parse_parts() {
        let chord: Chord = "F#m7/C#".parse().unwrap();
        assert_eq!(chord.root, NoteName::new(Letter::F, Accidental::Sharp));
        assert_eq!(chord.quality, "m7");
        assert_eq!(chord.bass, Some(NoteName::new(Letter::C, Accidental::Sharp)));

        let chord: Chord = "Bb".parse().unwrap();
        assert_eq!(chord.root, NoteName::new(Letter::B, Accidental::Flat));
        assert_eq!(chord.quality, "");
        assert_eq!(chord.bass, None);
    }

    #[test]
    fn test_slash_without_bass_stays_in_quality() {
        let chord: Chord = "C6/9".parse().unwrap();
        assert_eq!(chord.quality, "6/9");
        assert_eq!(chord.bass, None);
        assert_eq!(chord.to_string(), "C6/9");
    }

    #[test]
    fn test_unparseable() {
        assert!("N.C.".parse::<Chord>().is_err());
        assert!("am".parse::<Chord>().is_err());
        assert!("".parse::<Chord>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for text in ["C", "Am", "F#7", "Bbmaj7", "Dsus4/A", "Ebm7b5", "G/B"] {
            assert_eq!(text.parse::<Chord>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_transpose_examples() {
        assert_eq!(transpose_chord("Am", 2, false), "Bm");
        assert_eq!(transpose_chord("F#7", 1, false), "G7");
        assert_eq!(transpose_chord("C/E", -1, false), "B/D#");
        assert_eq!(transpose_chord("C/E", -1, true), "B/Eb");
    }

    #[test]
    fn test_transpose_respells_by_preference() {
        assert_eq!(transpose_chord("C", 1, false), "C#");
        assert_eq!(transpose_chord("C", 1, true), "Db");
        assert_eq!(transpose_chord("Bbm", 2, false), "Cm");
        assert_eq!(transpose_chord("A", 3, true), "C");
    }

    #[test]
    fn test_quality_untouched() {
        assert_eq!(transpose_chord("Gmaj7(#11)", 2, false), "Amaj7(#11)");
        assert_eq!(transpose_chord("Dbm7b5", -1, true), "Cm7b5");
    }

    #[test]
    fn test_free_text_passes_through() {
        assert_eq!(transpose_chord("N.C.", 3, false), "N.C.");
        assert_eq!(transpose_chord("", 3, false), "");
        assert_eq!(transpose_chord("x", 3, false), "x");
    }

    #[test]
    fn test_zero_delta_is_identity() {
        assert_eq!(transpose_chord("A#m", 0, true), "A#m");
        assert_eq!(transpose_chord("A#m", 12, true), "A#m");
    }
}
