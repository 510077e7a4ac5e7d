// Test staff geometry and the display list built from a session

use choral_staff_wasm::models::key_signature::{key_signature, key_signature_offset, SignatureType};
use choral_staff_wasm::models::{Accidental, EditorSession, StaffPitch, VoiceId};
use choral_staff_wasm::renderers::staff::{staff_pitches, STEP_COUNT};
use choral_staff_wasm::renderers::StaffGeometry;

#[test]
fn test_every_step_round_trips_through_y() {
    let geo = StaffGeometry::default();
    for (index, pitch) in staff_pitches().into_iter().enumerate() {
        let y = geo.step_index_to_y(index);
        assert_eq!(geo.y_to_step_index(y), index);
        assert_eq!(geo.y_to_pitch(y), pitch);

        // anything inside half a step lands on the same pitch
        assert_eq!(geo.y_to_pitch(y + 4.9), pitch, "{} nudged down", pitch);
        assert_eq!(geo.y_to_pitch(y - 4.9), pitch, "{} nudged up", pitch);
    }
    assert_eq!(staff_pitches().len(), STEP_COUNT);
}

#[test]
fn test_gestures_off_the_staff_snap_to_range() {
    let geo = StaffGeometry::default();
    assert_eq!(geo.y_to_pitch(-500.0), "B5".parse::<StaffPitch>().unwrap());
    assert_eq!(geo.y_to_pitch(2000.0), "C3".parse::<StaffPitch>().unwrap());
    assert_eq!(geo.y_to_pitch(f32::NAN), "C3".parse::<StaffPitch>().unwrap());
}

#[test]
fn test_ledger_lines_for_c4_and_a5() {
    let geo = StaffGeometry::default();
    let c4 = geo.pitch_to_y("C4".parse().unwrap()).unwrap();
    assert_eq!(geo.ledger_lines(c4), vec![250.0]);

    let a5 = geo.pitch_to_y("A5".parse().unwrap()).unwrap();
    assert_eq!(geo.ledger_lines(a5), vec![130.0]);

    let b5 = geo.pitch_to_y("B5".parse().unwrap()).unwrap();
    assert_eq!(geo.ledger_lines(b5), vec![130.0]);

    let g4 = geo.pitch_to_y("G4".parse().unwrap()).unwrap();
    assert!(geo.ledger_lines(g4).is_empty());
}

#[test]
fn test_key_signature_registry() {
    let d = key_signature("D");
    assert_eq!((d.kind, d.count), (SignatureType::Sharp, 2));

    let bb = key_signature("Bb");
    assert_eq!((bb.kind, bb.count), (SignatureType::Flat, 2));

    let unknown = key_signature("Z#");
    assert_eq!((unknown.kind, unknown.count), (SignatureType::None, 0));

    assert_eq!(key_signature_offset("C"), 0.0);
    assert_eq!(key_signature_offset("F#"), 72.0);
}

#[test]
fn test_scene_for_a_session() {
    let prime = VoiceId::new("prime");
    let tercia = VoiceId::new("tercia");
    let mut session = EditorSession::new();
    assert_eq!(session.change_key("D"), 2);

    session.add_token("glo", "D").unwrap();
    session.add_token("ria", "A7").unwrap();
    session.set_note(0, &prime, 170.0).unwrap();
    session.set_note(1, &tercia, 250.0).unwrap();
    session.set_accidental(0, &prime, Accidental::Sharp).unwrap();

    let scene = session.scene();
    assert_eq!(scene.staff_lines, vec![150.0, 170.0, 190.0, 210.0, 230.0]);

    // F#5 and C#5 for D major
    assert_eq!(scene.key_signature.len(), 2);
    assert_eq!(scene.key_signature[0].y, 150.0);
    assert_eq!(scene.key_signature[1].y, 180.0);

    // first column starts after the signature
    assert_eq!(scene.columns.columns[0].start_x, 150.0 + 24.0);
    assert_eq!(scene.labels[0].syllable, "GLO");
    assert_eq!(scene.labels[1].chord, "A7");

    assert_eq!(scene.notes.len(), 2);
    let first = &scene.notes[0];
    assert_eq!(first.voice_id, prime);
    assert_eq!(first.y, 170.0);
    assert_eq!(first.accidental, Accidental::Sharp);
    assert_eq!(first.accidental_x, Some(first.x - 18.0));

    let second = &scene.notes[1];
    assert_eq!(second.token_index, 1);
    assert_eq!(second.ledger_lines.len(), 1);
    assert_eq!(second.ledger_lines[0].y, 250.0);
    assert_eq!(second.accidental_x, None);
}

#[test]
fn test_inactive_voices_are_not_drawn() {
    let prime = VoiceId::new("prime");
    let mut session = EditorSession::new();
    session.add_token("a", "").unwrap();
    session.set_note(0, &prime, 200.0).unwrap();
    session.set_voice_active(&prime, false).unwrap();

    assert!(session.scene().notes.is_empty());
    // the note itself is kept
    assert!(session.document().tokens[0].note(&prime).is_some());
}
