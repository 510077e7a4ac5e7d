//! Stored-note transposition
//!
//! A note goes through its absolute value: shift by the delta, clamp into
//! the staff window, then choose the letter whose natural pitch is within a
//! semitone of the target and make up the difference with an accidental.

use crate::models::core::StoredNote;
use crate::models::pitch::{spell_name, Accidental, StaffPitch};
use crate::renderers::staff::clamp_absolute;

/// Spell an absolute pitch as a staff note for the given preference
pub fn respell_absolute(absolute: i32, prefer_flats: bool) -> StoredNote {
    let target = clamp_absolute(absolute);
    let name = spell_name(target.rem_euclid(12) as u8, prefer_flats);
    let pitch = StaffPitch::new(name.letter, target.div_euclid(12) - 1);

    let accidental = Accidental::from_offset(target - pitch.natural_absolute());
    StoredNote::new(pitch, accidental)
}

/// Transpose one note. A zero delta returns the note as is.
pub fn transpose_note(note: &StoredNote, delta: i32, prefer_flats: bool) -> StoredNote {
    if delta == 0 {
        return *note;
    }
    respell_absolute(note.absolute() + delta, prefer_flats)
}
