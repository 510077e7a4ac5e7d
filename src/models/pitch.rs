//! Pitch algebra for the twelve-tone chromatic scale
//!
//! Staff pitches are stored as a natural letter plus octave, with any
//! sharp or flat kept beside them as a separate accidental. Absolute
//! (MIDI-like) values are only ever computed on the fly:
//!
//! ```text
//! absolute = (octave + 1) * 12 + semitone(letter) + accidental_offset
//! ```
//!
//! so C4 = 60 and A4 = 69.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NotationError, Result};

/// Sharp-preferred spelling of each chromatic semitone
const SHARP_SPELLINGS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-preferred spelling of each chromatic semitone
const FLAT_SPELLINGS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Key names whose destination spelling leans on flats
const FLAT_SIDE_KEYS: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];

/// Natural letter names, in staff order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone of the natural letter within the octave (C = 0)
    pub fn natural_semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Diatonic position within the octave (C = 0 .. B = 6)
    pub fn diatonic_index(self) -> usize {
        self as usize
    }

    pub fn from_diatonic_index(index: usize) -> Letter {
        Letter::ALL[index % 7]
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Uppercase letters only; lowercase `b` is reserved for the flat sign
    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Accidental attached to a staff note
///
/// Drawn as a glyph beside the notehead; never moves the note vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    None,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn semitone_offset(self) -> i32 {
        match self {
            Accidental::None => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    /// ASCII symbol used in note and chord names
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    /// Glyph drawn next to a notehead
    pub fn glyph(self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
        }
    }

    /// Accidental pointing in the direction of `offset`
    pub fn from_offset(offset: i32) -> Accidental {
        match offset.signum() {
            1 => Accidental::Sharp,
            -1 => Accidental::Flat,
            _ => Accidental::None,
        }
    }

    fn from_symbol(c: char) -> Option<Accidental> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Accidental::None
    }
}

/// A letter with at most one accidental, without octave (e.g. `C#`, `Bb`)
///
/// Used for chord roots and bass notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl NoteName {
    pub fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Chromatic semitone 0..11
    pub fn semitone(&self) -> u8 {
        (self.letter.natural_semitone() as i32 + self.accidental.semitone_offset()).rem_euclid(12) as u8
    }

    /// Read a note name from the front of `text`, returning it and the
    /// number of bytes consumed.
    pub fn parse_prefix(text: &str) -> Option<(NoteName, usize)> {
        let mut chars = text.char_indices();
        let (_, first) = chars.next()?;
        let letter = Letter::from_char(first)?;
        let mut consumed = first.len_utf8();

        let mut accidental = Accidental::None;
        if let Some((idx, c)) = chars.next() {
            if let Some(acc) = Accidental::from_symbol(c) {
                accidental = acc;
                consumed = idx + c.len_utf8();
            }
        }

        Some((NoteName::new(letter, accidental), consumed))
    }
}

impl FromStr for NoteName {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        match NoteName::parse_prefix(s) {
            Some((name, consumed)) if consumed == s.len() => Ok(name),
            _ => Err(NotationError::UnknownNoteName(s.to_string())),
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.symbol())
    }
}

/// Natural letter plus octave; one line or space on the staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StaffPitch {
    pub letter: Letter,
    pub octave: i32,
}

impl StaffPitch {
    pub fn new(letter: Letter, octave: i32) -> Self {
        Self { letter, octave }
    }

    /// Diatonic steps counted from C0
    pub fn diatonic_number(&self) -> i32 {
        self.octave * 7 + self.letter.diatonic_index() as i32
    }

    pub fn from_diatonic_number(number: i32) -> Self {
        let octave = number.div_euclid(7);
        let letter = Letter::from_diatonic_index(number.rem_euclid(7) as usize);
        Self { letter, octave }
    }

    /// Absolute value of the natural (unaltered) pitch
    pub fn natural_absolute(&self) -> i32 {
        absolute_pitch(self.letter, self.octave, 0)
    }
}

impl fmt::Display for StaffPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.octave)
    }
}

impl FromStr for StaffPitch {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || NotationError::UnknownNoteName(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(unknown)?;
        let octave: i32 = chars.as_str().parse().map_err(|_| unknown())?;
        Ok(StaffPitch { letter, octave })
    }
}

impl TryFrom<String> for StaffPitch {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StaffPitch> for String {
    fn from(pitch: StaffPitch) -> String {
        pitch.to_string()
    }
}

/// Semitone (0..11) of a letter with an optional single accidental.
///
/// Both enharmonic spellings resolve to the same value (`C#` and `Db` → 1).
pub fn semitone_of(name: &str) -> Result<u8> {
    name.trim().parse::<NoteName>().map(|n| n.semitone())
}

/// Spell a chromatic semitone as a note name.
///
/// The caller's sharp/flat preference is the only input; key-specific
/// spelling beyond that bias is not modelled.
pub fn spell(semitone: u8, prefer_flats: bool) -> &'static str {
    let table = if prefer_flats { &FLAT_SPELLINGS } else { &SHARP_SPELLINGS };
    table[(semitone % 12) as usize]
}

/// Structured form of [`spell`]
pub fn spell_name(semitone: u8, prefer_flats: bool) -> NoteName {
    let text = spell(semitone, prefer_flats);
    let (name, _) = NoteName::parse_prefix(text).unwrap_or((NoteName::new(Letter::C, Accidental::None), 1));
    name
}

/// `(octave + 1) * 12 + semitone(letter) + offset`
pub fn absolute_pitch(letter: Letter, octave: i32, accidental_offset: i32) -> i32 {
    (octave + 1) * 12 + letter.natural_semitone() as i32 + accidental_offset
}

/// True for the flat-side keys (F, Bb, Eb, Ab, Db, Gb, Cb)
pub fn prefer_flats(key: &str) -> bool {
    FLAT_SIDE_KEYS.contains(&key.trim())
}
