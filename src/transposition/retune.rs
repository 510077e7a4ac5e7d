//! Whole-score key change
//!
//! A key change rewrites every chord and stored note of the live line and
//! of every saved block. The new content is prepared first and swapped in
//! only once all of it is ready, so callers never see a half-transposed
//! score.

use crate::models::core::{Block, Document, Token};
use crate::models::key::Key;
use super::chord::transpose_chord;
use super::note::transpose_note;

/// Fold a semitone distance into [-5, 6]. A tritone always resolves upward.
pub fn normalize_delta(raw: i32) -> i32 {
    let d = raw.rem_euclid(12);
    if d > 6 {
        d - 12
    } else {
        d
    }
}

/// Shortest signed distance between two keys. Unknown keys give 0.
pub fn semitone_distance(from_key: &str, to_key: &str) -> i32 {
    match (from_key.parse::<Key>(), to_key.parse::<Key>()) {
        (Ok(from), Ok(to)) => normalize_delta(to.semitone() as i32 - from.semitone() as i32),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("{}; treating key change as identity", e);
            0
        }
    }
}

/// Transposed copies of `tokens`
pub fn transpose_tokens(tokens: &[Token], delta: i32, prefer_flats: bool) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| Token {
            syllable: token.syllable.clone(),
            chord: transpose_chord(&token.chord, delta, prefer_flats),
            notes: token
                .notes
                .iter()
                .map(|(voice, slot)| {
                    let moved = slot.as_ref().map(|n| transpose_note(n, delta, prefer_flats));
                    (voice.clone(), moved)
                })
                .collect(),
        })
        .collect()
}

/// Move the document and all blocks from `from_key` to `to_key`.
///
/// Returns the semitone delta applied. An unknown destination leaves
/// everything untouched; an unknown origin relabels the key without moving
/// any pitch. Returning straight to the key a tritone move came from goes
/// back down, so the pair of changes cancels out.
pub fn retune(document: &mut Document, blocks: &mut [Block], from_key: &str, to_key: &str) -> i32 {
    let Ok(destination) = to_key.parse::<Key>() else {
        log::warn!("Unknown destination key '{}', score left as is", to_key);
        return 0;
    };

    let mut delta = semitone_distance(from_key, to_key);
    // undo a tritone move in the direction it was made
    if delta == 6 && document.tritone_origin == Some(destination) {
        delta = -6;
    }
    let prefer_flats = destination.prefers_flats();

    if delta != 0 {
        // prepare everything before touching the score
        let live = transpose_tokens(&document.tokens, delta, prefer_flats);
        let saved: Vec<Vec<Token>> = blocks
            .iter()
            .map(|b| transpose_tokens(b.tokens(), delta, prefer_flats))
            .collect();

        document.tokens = live;
        for (block, tokens) in blocks.iter_mut().zip(saved) {
            *block.tokens_mut() = tokens;
        }
    }

    document.tritone_origin = match (delta, from_key.parse::<Key>()) {
        (6, Ok(origin)) => Some(origin),
        _ => None,
    };
    document.key = destination;
    for block in blocks.iter_mut() {
        block.set_key(destination);
    }

    log::info!(
        "Key {} -> {} ({:+} semitones, {} block(s))",
        from_key,
        destination,
        delta,
        blocks.len()
    );
    delta
}
