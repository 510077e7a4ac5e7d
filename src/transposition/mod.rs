//! Transposition engine
//!
//! Moves chord symbols and stored notes by a number of semitones and
//! re-spells them for the destination key's sharp/flat preference. Notes
//! keep diatonic staff placement (a letter plus at most one accidental) and
//! are clamped into the drawable range.

pub mod chord;
pub mod note;
pub mod retune;

pub use chord::{transpose_chord, Chord};
pub use note::{respell_absolute, transpose_note};
pub use retune::{normalize_delta, retune, semitone_distance, transpose_tokens};
