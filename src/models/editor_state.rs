//! Editor session state
//!
//! The session owns everything one open editor works on: the live line, the
//! saved blocks, which voice is being edited and the pointer drag in
//! progress. The UI holds a session and calls into it for every gesture;
//! nothing in the core keeps global state.

use serde::Serialize;

use crate::error::{NotationError, Result};
use crate::renderers::display_list::{build_scene, token_start_x, StaffScene};
use crate::renderers::layout::{ColumnLayout, Columns};
use crate::renderers::staff::StaffGeometry;
use crate::transposition;
use super::core::{Block, Document, VoiceId, VoiceType};
use super::pitch::{Accidental, StaffPitch};

/// A note being dragged. Only one can be active (single pointer).
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DragSession {
    pub token_index: usize,
    pub voice_id: VoiceId,
}

/// Complete editor state
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    document: Document,
    blocks: Vec<Block>,
    selected_voice: Option<VoiceId>,
    #[serde(skip)]
    drag: Option<DragSession>,
    #[serde(skip)]
    geometry: StaffGeometry,
    #[serde(skip)]
    layout: ColumnLayout,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Fresh session with the preset voices, editing the first one
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        let selected_voice = document.voices.first().map(|v| v.id.clone());
        Self {
            document,
            blocks: Vec::new(),
            selected_voice,
            drag: None,
            geometry: StaffGeometry::default(),
            layout: ColumnLayout::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn selected_voice(&self) -> Option<&VoiceId> {
        self.selected_voice.as_ref()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn geometry(&self) -> &StaffGeometry {
        &self.geometry
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    pub fn add_token(&mut self, syllable: &str, chord: &str) -> Result<usize> {
        self.document.add_token(syllable, chord)
    }

    pub fn remove_token(&mut self, index: usize) -> Result<()> {
        self.document.remove_token(index)?;
        // indices after the removed token have shifted
        self.drag = None;
        Ok(())
    }

    pub fn set_chord(&mut self, index: usize, chord: &str) -> Result<()> {
        self.document.set_chord(index, chord)
    }

    /// Empty the live line; voices, key and blocks stay
    pub fn clear_line(&mut self) {
        self.document.clear_tokens();
        self.drag = None;
    }

    // ------------------------------------------------------------------
    // Voices
    // ------------------------------------------------------------------

    /// Add a voice (Sobreprime when unnamed) and start editing it
    pub fn add_voice(&mut self, name: Option<VoiceType>) -> VoiceId {
        let id = self.document.add_voice(name.unwrap_or(VoiceType::Sobreprime));
        self.selected_voice = Some(id.clone());
        id
    }

    pub fn remove_voice(&mut self, id: &VoiceId) -> Result<()> {
        self.document.remove_voice(id)?;

        if self.drag.as_ref().is_some_and(|d| &d.voice_id == id) {
            self.drag = None;
        }
        if self.selected_voice.as_ref() == Some(id) {
            self.selected_voice = self.document.voices.first().map(|v| v.id.clone());
        }
        Ok(())
    }

    pub fn select_voice(&mut self, id: &VoiceId) -> Result<()> {
        if self.document.voice(id).is_none() {
            return Err(NotationError::UnknownVoice(id.to_string()));
        }
        self.selected_voice = Some(id.clone());
        Ok(())
    }

    pub fn set_voice_active(&mut self, id: &VoiceId, active: bool) -> Result<()> {
        self.document.set_voice_active(id, active)
    }

    pub fn set_voice_type(&mut self, id: &VoiceId, name: VoiceType) -> Result<()> {
        self.document.set_voice_type(id, name)
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn set_note(&mut self, index: usize, voice: &VoiceId, y: f32) -> Result<StaffPitch> {
        self.document.set_note(index, voice, y, &self.geometry)
    }

    pub fn clear_note(&mut self, index: usize, voice: &VoiceId) -> Result<()> {
        self.document.clear_note(index, voice).map(|_| ())
    }

    pub fn set_accidental(&mut self, index: usize, voice: &VoiceId, accidental: Accidental) -> Result<bool> {
        self.document.set_accidental(index, voice, accidental)
    }

    /// Click on the staff: write the selected voice's note for the token
    /// under `x`. Clicks outside every column, or with no voice selected,
    /// do nothing.
    pub fn place_note_at(&mut self, x: f32, y: f32) -> Result<Option<(usize, StaffPitch)>> {
        let Some(voice) = self.selected_voice.clone() else {
            return Ok(None);
        };
        let Some(index) = self.columns().token_at_x(x) else {
            return Ok(None);
        };

        let pitch = self.set_note(index, &voice, y)?;
        Ok(Some((index, pitch)))
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    /// Press on a notehead. Replaces any session already active.
    pub fn begin_drag(&mut self, index: usize, voice: &VoiceId) -> Result<()> {
        self.document.note(index, voice)?;
        self.drag = Some(DragSession {
            token_index: index,
            voice_id: voice.clone(),
        });
        Ok(())
    }

    /// Pointer move: overwrite the dragged note from the pointer's Y.
    ///
    /// Without an active session, or if its token is gone, this is a no-op.
    pub fn drag_to(&mut self, y: f32) -> Result<Option<StaffPitch>> {
        let Some(drag) = self.drag.clone() else {
            return Ok(None);
        };
        if drag.token_index >= self.document.tokens.len() {
            return Ok(None);
        }
        self.set_note(drag.token_index, &drag.voice_id, y).map(Some)
    }

    /// Release or pointer-leave
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    // ------------------------------------------------------------------
    // Key and blocks
    // ------------------------------------------------------------------

    /// Change the global key, transposing the live line and every block.
    /// Returns the semitone delta applied.
    pub fn change_key(&mut self, key: &str) -> i32 {
        let from = self.document.key.as_str();
        transposition::retune(&mut self.document, &mut self.blocks, from, key)
    }

    /// Save the live line as a block and start a new line.
    ///
    /// Returns the new block's index, or `None` when the line is empty.
    pub fn commit_block(&mut self, song_type: &str, comments: &str) -> Option<usize> {
        let block = self.document.commit_block(song_type, comments)?;
        self.blocks.push(block);
        self.drag = None;
        log::info!("Committed block {}", self.blocks.len());
        Some(self.blocks.len() - 1)
    }

    pub fn edit_block_chord(&mut self, block: usize, token: usize, chord: &str) -> Result<()> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(block)
            .ok_or(NotationError::BlockIndexOutOfRange { index: block, len })?
            .set_chord(token, chord)
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Columns of the live line, for hit-testing
    pub fn columns(&self) -> Columns {
        let start = token_start_x(&self.layout, self.document.key);
        self.layout.build_columns(&self.document.tokens, start)
    }

    pub fn scene(&self) -> StaffScene {
        build_scene(
            &self.document.tokens,
            &self.document.voices,
            self.document.key,
            &self.geometry,
            &self.layout,
        )
    }

    pub fn block_scene(&self, index: usize) -> Result<StaffScene> {
        let len = self.blocks.len();
        let block = self
            .blocks
            .get(index)
            .ok_or(NotationError::BlockIndexOutOfRange { index, len })?;
        Ok(build_scene(
            block.tokens(),
            block.voices(),
            block.key(),
            &self.geometry,
            &self.layout,
        ))
    }

    /// JSON dump of document, blocks and selection
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
