//! Core document model for the choral editor
//!
//! A [`Document`] is the live editing line: lyric tokens, the voices that
//! sing them, and the global key. Every token holds exactly one note slot per
//! live voice (possibly empty); adding or removing a voice keeps that
//! invariant across all tokens. A [`Block`] is a frozen copy of a committed
//! line.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{NotationError, Result};
use crate::renderers::staff::StaffGeometry;
use super::key::Key;
use super::pitch::{absolute_pitch, Accidental, StaffPitch};
use super::serde_helpers::StoredNoteShape;

/// Colors handed to voices created after the presets, cycled by voice count
pub const VOICE_COLORS: [&str; 7] = [
    "#e63946", "#1d3557", "#0d9488", "#2a9d8f", "#6a4c93", "#ef476f", "#3a86ff",
];

/// First number used for `voice_N` ids
const FIRST_VOICE_NUMBER: u32 = 100;

/// Stable identifier of a voice; survives renames
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoiceId {
    fn from(id: &str) -> Self {
        VoiceId::new(id)
    }
}

/// Voice-type labels a voice can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VoiceType {
    #[default]
    Prime,
    #[serde(rename = "Prime alte")]
    PrimeAlte,
    Sobreprime,
    Segundo,
    Tercia,
    #[serde(rename = "Solista 1")]
    Solista1,
    #[serde(rename = "Solista 2")]
    Solista2,
    #[serde(rename = "Solista 3")]
    Solista3,
    #[serde(rename = "Solista 4")]
    Solista4,
    #[serde(rename = "Solista 5")]
    Solista5,
    #[serde(rename = "Solista 6")]
    Solista6,
}

impl VoiceType {
    pub const ALL: [VoiceType; 11] = [
        VoiceType::Prime,
        VoiceType::PrimeAlte,
        VoiceType::Sobreprime,
        VoiceType::Segundo,
        VoiceType::Tercia,
        VoiceType::Solista1,
        VoiceType::Solista2,
        VoiceType::Solista3,
        VoiceType::Solista4,
        VoiceType::Solista5,
        VoiceType::Solista6,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VoiceType::Prime => "Prime",
            VoiceType::PrimeAlte => "Prime alte",
            VoiceType::Sobreprime => "Sobreprime",
            VoiceType::Segundo => "Segundo",
            VoiceType::Tercia => "Tercia",
            VoiceType::Solista1 => "Solista 1",
            VoiceType::Solista2 => "Solista 2",
            VoiceType::Solista3 => "Solista 3",
            VoiceType::Solista4 => "Solista 4",
            VoiceType::Solista5 => "Solista 5",
            VoiceType::Solista6 => "Solista 6",
        }
    }
}

impl fmt::Display for VoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VoiceType {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        VoiceType::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| NotationError::UnknownVoiceType(s.to_string()))
    }
}

/// A singing part
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Voice {
    pub id: VoiceId,
    pub name: VoiceType,
    pub color: String,
    /// Inactive voices keep their notes but are not drawn
    pub active: bool,
}

impl Voice {
    pub fn new(id: VoiceId, name: VoiceType, color: impl Into<String>) -> Self {
        Self {
            id,
            name,
            color: color.into(),
            active: true,
        }
    }

    /// The five voices every new session starts with
    pub fn presets() -> Vec<Voice> {
        vec![
            Voice::new("prime".into(), VoiceType::Prime, "#e63946"),
            Voice::new("prime_alte".into(), VoiceType::PrimeAlte, "#1d3557"),
            Voice::new("sobreprime".into(), VoiceType::Sobreprime, "#0d9488"),
            Voice::new("segundo".into(), VoiceType::Segundo, "#2a9d8f"),
            Voice::new("tercia".into(), VoiceType::Tercia, "#6a4c93"),
        ]
    }
}

/// A note placed on the staff for one (token, voice) slot
///
/// Accepts the legacy bare-string shape (`"C4"`) on input and always
/// serializes as `{ pitch, accidental }`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(from = "StoredNoteShape")]
pub struct StoredNote {
    pub pitch: StaffPitch,
    pub accidental: Accidental,
}

impl StoredNote {
    pub fn new(pitch: StaffPitch, accidental: Accidental) -> Self {
        Self { pitch, accidental }
    }

    pub fn natural(pitch: StaffPitch) -> Self {
        Self::new(pitch, Accidental::None)
    }

    /// Absolute (MIDI-like) value including the accidental
    pub fn absolute(&self) -> i32 {
        absolute_pitch(self.pitch.letter, self.pitch.octave, self.accidental.semitone_offset())
    }
}

impl fmt::Display for StoredNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pitch.letter, self.accidental.symbol(), self.pitch.octave)
    }
}

/// One lyric syllable with its chord and a note slot per voice
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Token {
    pub syllable: String,
    #[serde(default)]
    pub chord: String,
    #[serde(default)]
    pub notes: BTreeMap<VoiceId, Option<StoredNote>>,
}

impl Token {
    /// Create a token with an empty slot for every voice
    pub fn new<'a>(
        syllable: impl Into<String>,
        chord: impl Into<String>,
        voices: impl IntoIterator<Item = &'a Voice>,
    ) -> Self {
        Self {
            syllable: syllable.into(),
            chord: chord.into(),
            notes: voices.into_iter().map(|v| (v.id.clone(), None)).collect(),
        }
    }

    pub fn note(&self, voice: &VoiceId) -> Option<&StoredNote> {
        self.notes.get(voice).and_then(|n| n.as_ref())
    }
}

/// The live editing line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub voices: Vec<Voice>,
    pub key: Key,
    #[serde(default = "first_voice_number")]
    next_voice_number: u32,
    /// Key the score left by a tritone move, so returning there goes back down
    #[serde(skip)]
    pub(crate) tritone_origin: Option<Key>,
}

fn first_voice_number() -> u32 {
    FIRST_VOICE_NUMBER
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty line in C with the preset voices
    pub fn new() -> Self {
        Self::with_voices(Voice::presets())
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            tokens: Vec::new(),
            voices,
            key: Key::default(),
            next_voice_number: FIRST_VOICE_NUMBER,
            tritone_origin: None,
        }
    }

    pub fn voice(&self, id: &VoiceId) -> Option<&Voice> {
        self.voices.iter().find(|v| &v.id == id)
    }

    fn voice_mut(&mut self, id: &VoiceId) -> Result<&mut Voice> {
        self.voices
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| NotationError::UnknownVoice(id.to_string()))
    }

    fn token_mut(&mut self, index: usize) -> Result<&mut Token> {
        let len = self.tokens.len();
        self.tokens
            .get_mut(index)
            .ok_or(NotationError::TokenIndexOutOfRange { index, len })
    }

    /// Note slot for (token, voice), checking both exist
    fn slot_mut(&mut self, index: usize, voice: &VoiceId) -> Result<&mut Option<StoredNote>> {
        if self.voice(voice).is_none() {
            return Err(NotationError::UnknownVoice(voice.to_string()));
        }
        let token = self.token_mut(index)?;
        Ok(token.notes.entry(voice.clone()).or_insert(None))
    }

    /// Append a token. Blank syllables are rejected.
    pub fn add_token(&mut self, syllable: &str, chord: &str) -> Result<usize> {
        let syllable = syllable.trim();
        if syllable.is_empty() {
            return Err(NotationError::EmptySyllable);
        }

        self.tokens.push(Token::new(syllable, chord.trim(), &self.voices));
        log::debug!("Added token '{}' at {}", syllable, self.tokens.len() - 1);
        Ok(self.tokens.len() - 1)
    }

    pub fn remove_token(&mut self, index: usize) -> Result<Token> {
        let len = self.tokens.len();
        if index >= len {
            return Err(NotationError::TokenIndexOutOfRange { index, len });
        }
        Ok(self.tokens.remove(index))
    }

    pub fn set_chord(&mut self, index: usize, chord: &str) -> Result<()> {
        self.token_mut(index)?.chord = chord.trim().to_string();
        Ok(())
    }

    /// Remove every token, keeping voices and key
    pub fn clear_tokens(&mut self) {
        self.tokens.clear();
    }

    pub fn note(&self, index: usize, voice: &VoiceId) -> Result<Option<&StoredNote>> {
        if self.voice(voice).is_none() {
            return Err(NotationError::UnknownVoice(voice.to_string()));
        }
        let len = self.tokens.len();
        let token = self
            .tokens
            .get(index)
            .ok_or(NotationError::TokenIndexOutOfRange { index, len })?;
        Ok(token.note(voice))
    }

    /// Place a note at a staff pitch, keeping the slot's accidental if any
    pub fn set_note_pitch(&mut self, index: usize, voice: &VoiceId, pitch: StaffPitch) -> Result<()> {
        let slot = self.slot_mut(index, voice)?;
        let accidental = slot.as_ref().map(|n| n.accidental).unwrap_or_default();
        *slot = Some(StoredNote::new(pitch, accidental));
        Ok(())
    }

    /// Place a note from a raw vertical coordinate.
    ///
    /// Coordinates beyond the staff range snap to the nearest drawable pitch.
    pub fn set_note(
        &mut self,
        index: usize,
        voice: &VoiceId,
        y: f32,
        geometry: &StaffGeometry,
    ) -> Result<StaffPitch> {
        let pitch = geometry.y_to_pitch(y);
        self.set_note_pitch(index, voice, pitch)?;
        log::debug!("Set note {}/{} to {} (y={})", index, voice, pitch, y);
        Ok(pitch)
    }

    pub fn clear_note(&mut self, index: usize, voice: &VoiceId) -> Result<Option<StoredNote>> {
        Ok(self.slot_mut(index, voice)?.take())
    }

    /// Set the accidental of an existing note. Returns false when the slot is empty.
    pub fn set_accidental(&mut self, index: usize, voice: &VoiceId, accidental: Accidental) -> Result<bool> {
        match self.slot_mut(index, voice)? {
            Some(note) => {
                note.accidental = accidental;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Largest `N` among `voice_N` ids currently in the document
    fn highest_voice_number(&self) -> Option<u32> {
        self.voices
            .iter()
            .filter_map(|v| v.id.as_str().strip_prefix("voice_")?.parse::<u32>().ok())
            .max()
    }

    /// Add a voice and backfill an empty slot into every token
    pub fn add_voice(&mut self, name: VoiceType) -> VoiceId {
        let color = VOICE_COLORS[self.voices.len() % VOICE_COLORS.len()];
        // loaded documents may already hold voice_N ids past the counter
        let number = self.next_voice_number.max(self.highest_voice_number().map_or(0, |n| n + 1));
        let id = VoiceId::new(format!("voice_{}", number));
        self.next_voice_number = number + 1;

        self.voices.push(Voice::new(id.clone(), name, color));
        for token in &mut self.tokens {
            token.notes.insert(id.clone(), None);
        }

        log::debug!("Added voice {} ({})", id, name);
        id
    }

    /// Remove a voice and delete its slot from every token
    pub fn remove_voice(&mut self, id: &VoiceId) -> Result<Voice> {
        let position = self
            .voices
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| NotationError::UnknownVoice(id.to_string()))?;

        let voice = self.voices.remove(position);
        for token in &mut self.tokens {
            token.notes.remove(id);
        }

        log::debug!("Removed voice {}", id);
        Ok(voice)
    }

    pub fn set_voice_active(&mut self, id: &VoiceId, active: bool) -> Result<()> {
        self.voice_mut(id)?.active = active;
        Ok(())
    }

    pub fn set_voice_type(&mut self, id: &VoiceId, name: VoiceType) -> Result<()> {
        self.voice_mut(id)?.name = name;
        Ok(())
    }

    /// Freeze the current tokens into a block and clear the line.
    ///
    /// Returns `None` when there is nothing to commit.
    pub fn commit_block(&mut self, song_type: &str, comments: &str) -> Option<Block> {
        if self.tokens.is_empty() {
            return None;
        }

        let block = Block {
            tokens: std::mem::take(&mut self.tokens),
            voices: self.voices.clone(),
            key: self.key,
            song_type: song_type.to_string(),
            comments: comments.to_string(),
        };
        Some(block)
    }
}

/// A committed line, independent of the live document
///
/// Only whole-score rewrites (key changes, chord edits) touch a block after
/// it is created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    tokens: Vec<Token>,
    voices: Vec<Voice>,
    key: Key,
    song_type: String,
    #[serde(default)]
    comments: String,
}

impl Block {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn song_type(&self) -> &str {
        &self.song_type
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<Token> {
        &mut self.tokens
    }

    pub(crate) fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    pub(crate) fn set_chord(&mut self, index: usize, chord: &str) -> Result<()> {
        let len = self.tokens.len();
        let token = self
            .tokens
            .get_mut(index)
            .ok_or(NotationError::TokenIndexOutOfRange { index, len })?;
        token.chord = chord.trim().to_string();
        Ok(())
    }
}
