//! Display list for the staff
//!
//! Everything the UI needs to draw one staff (the live line or a saved
//! block) with pre-computed coordinates. The JavaScript side only creates
//! SVG elements from this; it does no layout of its own.

use serde::{Deserialize, Serialize};

use crate::models::core::{Token, Voice, VoiceId};
use crate::models::key::Key;
use crate::models::key_signature::{self, SignatureType};
use crate::models::pitch::Accidental;
use super::layout::{ColumnLayout, Columns};
use super::staff::StaffGeometry;

/// Space between the right end of the staff lines and the scene edge
const STAFF_RIGHT_MARGIN: f32 = 35.0;

/// Offset of an accidental glyph left of its notehead
const ACCIDENTAL_OFFSET_X: f32 = 18.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffScene {
    pub width: f32,
    pub height: f32,
    pub clef_x: f32,
    pub staff_left_x: f32,
    pub staff_right_x: f32,
    /// Y of the five staff lines, top to bottom
    pub staff_lines: Vec<f32>,
    pub key_signature: Vec<SignatureMark>,
    pub columns: Columns,
    pub labels: Vec<TokenLabel>,
    pub notes: Vec<NoteHead>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SignatureMark {
    pub x: f32,
    pub y: f32,
    pub kind: SignatureType,
    pub glyph: String,
}

/// Chord and syllable text above the staff
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenLabel {
    pub token_index: usize,
    pub x: f32,
    pub chord: String,
    /// Drawn uppercase
    pub syllable: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LedgerLine {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteHead {
    pub token_index: usize,
    pub voice_id: VoiceId,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub ledger_lines: Vec<LedgerLine>,
    pub accidental: Accidental,
    /// Position of the accidental glyph, when there is one
    pub accidental_x: Option<f32>,
    pub accidental_glyph: String,
}

/// X of the first token column for a key: leaves room for the signature
pub fn token_start_x(layout: &ColumnLayout, key: Key) -> f32 {
    layout.start_x + key_signature::key_signature_offset(key.as_str())
}

/// Signature marks for a key, placed on the staff
pub fn signature_marks(key: Key, geometry: &StaffGeometry) -> Vec<SignatureMark> {
    let signature = key.signature();
    let glyph = match signature.kind {
        SignatureType::Sharp => Accidental::Sharp.glyph(),
        SignatureType::Flat => Accidental::Flat.glyph(),
        SignatureType::None => "",
    };

    signature
        .positions()
        .iter()
        .enumerate()
        .filter_map(|(i, &pitch)| {
            geometry.pitch_to_y(pitch).map(|y| SignatureMark {
                x: key_signature::mark_x(i),
                y,
                kind: signature.kind,
                glyph: glyph.to_string(),
            })
        })
        .collect()
}

/// Build the display list for a staff. Inactive voices are left out.
pub fn build_scene(
    tokens: &[Token],
    voices: &[Voice],
    key: Key,
    geometry: &StaffGeometry,
    layout: &ColumnLayout,
) -> StaffScene {
    let columns = layout.build_columns(tokens, token_start_x(layout, key));

    let labels = tokens
        .iter()
        .zip(&columns.columns)
        .enumerate()
        .map(|(i, (token, column))| TokenLabel {
            token_index: i,
            x: column.center_x,
            chord: token.chord.clone(),
            syllable: token.syllable.to_uppercase(),
        })
        .collect();

    let mut notes = Vec::new();
    for (i, (token, column)) in tokens.iter().zip(&columns.columns).enumerate() {
        for voice in voices.iter().filter(|v| v.active) {
            let Some(note) = token.note(&voice.id) else {
                continue;
            };
            let Some(y) = geometry.pitch_to_y(note.pitch) else {
                log::warn!("Note {} for {} is off the staff, not drawn", note, voice.id);
                continue;
            };

            // every voice shares the column center; noteheads stack vertically
            let x = column.center_x;
            let ledger_lines = geometry
                .ledger_lines(y)
                .into_iter()
                .map(|ly| LedgerLine {
                    x1: x - geometry.ledger_half_width,
                    x2: x + geometry.ledger_half_width,
                    y: ly,
                })
                .collect();

            notes.push(NoteHead {
                token_index: i,
                voice_id: voice.id.clone(),
                color: voice.color.clone(),
                x,
                y,
                ledger_lines,
                accidental: note.accidental,
                accidental_x: (!note.accidental.is_none()).then_some(x - ACCIDENTAL_OFFSET_X),
                accidental_glyph: note.accidental.glyph().to_string(),
            });
        }
    }

    StaffScene {
        width: columns.total_width,
        height: geometry.base_y + 2.0 * geometry.step_height,
        clef_x: geometry.clef_x,
        staff_left_x: geometry.staff_left_x,
        staff_right_x: columns.total_width - STAFF_RIGHT_MARGIN,
        staff_lines: geometry.staff_line_ys(),
        key_signature: signature_marks(key, geometry),
        columns,
        labels,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{Document, StoredNote};

    fn prime() -> VoiceId {
        VoiceId::new("prime")
    }

    #[test]
    fn test_signature_marks_for_d() {
        let geo = StaffGeometry::default();
        let marks = signature_marks(Key::D, &geo);
        assert_eq!(marks.len(), 2);
        // F5 on the top line, C5 in the third space
        assert_eq!(marks[0].y, 150.0);
        assert_eq!(marks[1].y, 180.0);
        assert!(marks[0].x < marks[1].x);
        assert_eq!(marks[0].glyph, "♯");
    }

    #[test]
    fn test_tokens_clear_signature() {
        let layout = ColumnLayout::default();
        assert_eq!(token_start_x(&layout, Key::C), layout.start_x);
        assert!(token_start_x(&layout, Key::Cs) > token_start_x(&layout, Key::D));
    }

    #[test]
    fn test_scene_notes_and_labels() {
        let mut doc = Document::new();
        doc.add_token("do", "C").unwrap();
        doc.add_token("re", "").unwrap();
        doc.set_note_pitch(0, &prime(), "C4".parse().unwrap()).unwrap();
        doc.set_note_pitch(1, &VoiceId::new("segundo"), "A4".parse().unwrap()).unwrap();
        doc.set_accidental(1, &VoiceId::new("segundo"), Accidental::Flat).unwrap();

        let scene = build_scene(
            &doc.tokens,
            &doc.voices,
            doc.key,
            &StaffGeometry::default(),
            &ColumnLayout::default(),
        );

        assert_eq!(scene.labels[0].syllable, "DO");
        assert_eq!(scene.labels[0].chord, "C");
        assert_eq!(scene.notes.len(), 2);

        let c4 = &scene.notes[0];
        assert_eq!(c4.voice_id, prime());
        assert_eq!(c4.ledger_lines.len(), 1);
        assert_eq!(c4.accidental_x, None);

        let a4 = &scene.notes[1];
        assert_eq!(a4.accidental_glyph, "♭");
        assert_eq!(a4.accidental_x, Some(a4.x - ACCIDENTAL_OFFSET_X));
        assert!(a4.ledger_lines.is_empty());
    }

    #[test]
    fn test_inactive_voices_are_hidden() {
        let mut doc = Document::new();
        doc.add_token("do", "").unwrap();
        doc.set_note_pitch(0, &prime(), "G4".parse().unwrap()).unwrap();
        doc.set_voice_active(&prime(), false).unwrap();

        let scene = build_scene(&doc.tokens, &doc.voices, doc.key, &StaffGeometry::default(), &ColumnLayout::default());
        assert!(scene.notes.is_empty());
        // data is kept
        assert!(doc.note(0, &prime()).unwrap().is_some());
    }

    #[test]
    fn test_off_staff_note_skipped() {
        let mut doc = Document::new();
        doc.add_token("do", "").unwrap();
        doc.tokens[0]
            .notes
            .insert(prime(), Some(StoredNote::natural("C7".parse().unwrap())));

        let scene = build_scene(&doc.tokens, &doc.voices, doc.key, &StaffGeometry::default(), &ColumnLayout::default());
        assert!(scene.notes.is_empty());
    }
}
