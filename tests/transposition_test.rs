// Test key changes across the whole score

use choral_staff_wasm::models::pitch::{absolute_pitch, Letter};
use choral_staff_wasm::models::{Accidental, EditorSession, Key, StaffPitch, StoredNote, VoiceId};
use choral_staff_wasm::transposition::{semitone_distance, transpose_chord, transpose_note};

fn pitch(s: &str) -> StaffPitch {
    s.parse().unwrap()
}

/// Session with one token holding mid-range notes in three voices
fn session_with_notes() -> EditorSession {
    let mut session = EditorSession::new();
    session.add_token("la", "Am7").unwrap();
    // A4, B4, G#4
    session.set_note(0, &VoiceId::new("prime"), 200.0).unwrap();
    session.set_note(0, &VoiceId::new("segundo"), 190.0).unwrap();
    session.set_note(0, &VoiceId::new("tercia"), 210.0).unwrap();
    session
        .set_accidental(0, &VoiceId::new("tercia"), Accidental::Sharp)
        .unwrap();
    session
}

fn absolutes(session: &EditorSession) -> Vec<Option<i32>> {
    session.document().tokens[0]
        .notes
        .values()
        .map(|n| n.map(|n| n.absolute()))
        .collect()
}

#[test]
fn test_round_trip_between_every_key_pair() {
    for first in Key::ALL {
        for second in Key::ALL {
            let mut session = session_with_notes();
            session.change_key(first.as_str());
            let before = absolutes(&session);

            session.change_key(second.as_str());
            session.change_key(first.as_str());

            assert_eq!(
                absolutes(&session),
                before,
                "{} -> {} -> {} moved the notes",
                first,
                second,
                first
            );
            assert_eq!(session.document().key, first);
        }
    }
}

#[test]
fn test_clamp_at_range_edge_is_not_undone() {
    let prime = VoiceId::new("prime");
    let mut session = EditorSession::new();
    session.add_token("si", "G").unwrap();
    session.set_note(0, &prime, 120.0).unwrap();
    assert_eq!(session.document().tokens[0].note(&prime).map(|n| n.absolute()), Some(83));

    // up to D pins the note at B5; coming back lowers it from there
    session.change_key("D");
    assert_eq!(session.document().tokens[0].note(&prime).map(|n| n.absolute()), Some(83));
    session.change_key("C");
    assert_eq!(session.document().tokens[0].note(&prime).map(|n| n.absolute()), Some(81));
    assert_eq!(session.document().tokens[0].chord, "G");
}

#[test]
fn test_note_round_trip_by_opposite_deltas() {
    let note = StoredNote::new(pitch("B4"), Accidental::Flat);
    for delta in -5..=5 {
        for prefer_flats in [false, true] {
            let moved = transpose_note(&note, delta, prefer_flats);
            let back = transpose_note(&moved, -delta, !prefer_flats);
            assert_eq!(back.absolute(), note.absolute(), "delta {}", delta);
        }
    }
}

#[test]
fn test_distance_is_shortest_path() {
    for from in Key::ALL {
        for to in Key::ALL {
            let d = semitone_distance(from.as_str(), to.as_str());
            assert!((-5..=6).contains(&d), "{} -> {} gave {}", from, to, d);
            assert_eq!(
                (from.semitone() as i32 + d).rem_euclid(12),
                to.semitone() as i32,
                "{} -> {}",
                from,
                to
            );
        }
    }
}

#[test]
fn test_chord_examples() {
    assert_eq!(transpose_chord("Am", 2, false), "Bm");
    assert_eq!(transpose_chord("F#7", 1, false), "G7");
    assert_eq!(transpose_chord("C/E", -1, false), "B/D#");
    assert_eq!(transpose_chord("C/E", -1, true), "B/Eb");
    assert_eq!(transpose_chord("G", 12, true), "G");
    assert_eq!(transpose_chord("", 3, false), "");
    assert_eq!(transpose_chord("N.C.", 3, false), "N.C.");
}

#[test]
fn test_transposed_notes_stay_diatonic() {
    for absolute in 48..=83 {
        let letter_octave = |n: &StoredNote| (n.pitch.letter, n.pitch.octave);
        for prefer_flats in [false, true] {
            let note = choral_staff_wasm::transposition::respell_absolute(absolute, prefer_flats);
            assert_eq!(note.absolute(), absolute);
            let (letter, octave) = letter_octave(&note);
            assert_eq!(
                absolute_pitch(letter, octave, note.accidental.semitone_offset()),
                absolute
            );
            if prefer_flats {
                assert_ne!(note.accidental, Accidental::Sharp);
            } else {
                assert_ne!(note.accidental, Accidental::Flat);
            }
        }
    }
}

#[test]
fn test_top_of_range_clamps() {
    let top = StoredNote::natural(pitch("A5"));
    let moved = transpose_note(&top, 5, false);
    assert_eq!(moved.pitch, StaffPitch::new(Letter::B, 5));
    assert_eq!(moved.absolute(), 83);
}

#[test]
fn test_end_to_end_c_to_d_and_back() {
    let prime = VoiceId::new("prime");
    let mut session = EditorSession::new();
    session.add_token("do", "C").unwrap();
    session.set_note(0, &prime, 250.0).unwrap();
    assert_eq!(
        session.document().tokens[0].note(&prime),
        Some(&StoredNote::natural(pitch("C4")))
    );

    assert_eq!(session.change_key("D"), 2);
    let token = &session.document().tokens[0];
    assert_eq!(token.syllable, "do");
    assert_eq!(token.chord, "D");
    assert_eq!(token.note(&prime), Some(&StoredNote::natural(pitch("D4"))));
    assert_eq!(session.document().key, Key::D);

    assert_eq!(session.change_key("C"), -2);
    let token = &session.document().tokens[0];
    assert_eq!(token.chord, "C");
    assert_eq!(token.note(&prime), Some(&StoredNote::natural(pitch("C4"))));
}

#[test]
fn test_saved_blocks_follow_the_key() {
    let prime = VoiceId::new("prime");
    let mut session = EditorSession::new();
    session.add_token("mi", "Em").unwrap();
    session.set_note(0, &prime, 230.0).unwrap();
    assert_eq!(session.commit_block("Vals", "first verse"), Some(0));

    session.change_key("Eb");

    let block = &session.blocks()[0];
    assert_eq!(block.key(), Key::Eb);
    assert_eq!(block.tokens()[0].chord, "Gm");
    assert_eq!(
        block.tokens()[0].note(&prime),
        Some(&StoredNote::natural(pitch("G4")))
    );
    assert_eq!(block.comments(), "first verse");
}

#[test]
fn test_unknown_key_leaves_score_alone() {
    let mut session = EditorSession::new();
    session.add_token("do", "C").unwrap();
    let before = session.document().clone();
    assert_eq!(session.change_key("H"), 0);
    assert_eq!(session.document(), &before);
}
