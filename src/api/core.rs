//! WASM API for the editing session
//!
//! `ChoralEditor` wraps one [`EditorSession`]; the page creates one per
//! editor and calls these methods from its event handlers. Core errors come
//! back as rejected `Result`s carrying the error message.

use wasm_bindgen::prelude::*;

use crate::error::NotationError;
use crate::models::{Document, EditorSession};
use crate::{wasm_info, wasm_log, wasm_warn};
use super::helpers::{deserialize, parse_accidental, parse_voice_type, serialize, to_js_error, voice_id};
use super::types::{KeyChange, NotePlacement};

#[wasm_bindgen]
pub struct ChoralEditor {
    session: EditorSession,
}

impl Default for ChoralEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ChoralEditor {
    /// Create an editor with the preset voices, in C
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChoralEditor {
        ChoralEditor {
            session: EditorSession::new(),
        }
    }

    /// Create an editor from a serialized document.
    ///
    /// Notes may use either the bare-string or the object shape.
    #[wasm_bindgen(js_name = fromDocument)]
    pub fn from_document(document_js: JsValue) -> Result<ChoralEditor, JsValue> {
        let document: Document = deserialize(document_js, "Document deserialization error")?;
        wasm_info!("Loaded document: {} tokens, {} voices", document.tokens.len(), document.voices.len());
        Ok(ChoralEditor {
            session: EditorSession::with_document(document),
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = getDocument)]
    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.document(), "Document serialization error")
    }

    #[wasm_bindgen(js_name = getBlocks)]
    pub fn get_blocks(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.blocks(), "Blocks serialization error")
    }

    #[wasm_bindgen(js_name = getSelectedVoice)]
    pub fn get_selected_voice(&self) -> Option<String> {
        self.session.selected_voice().map(|v| v.to_string())
    }

    /// Token columns of the live line
    #[wasm_bindgen(js_name = layout)]
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.columns(), "Layout serialization error")
    }

    #[wasm_bindgen(js_name = renderScene)]
    pub fn render_scene(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.scene(), "Scene serialization error")
    }

    #[wasm_bindgen(js_name = renderBlockScene)]
    pub fn render_block_scene(&self, index: usize) -> Result<JsValue, JsValue> {
        let scene = self.session.block_scene(index).map_err(to_js_error)?;
        serialize(&scene, "Scene serialization error")
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.session
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    /// Append a token. Returns false when the syllable is blank.
    #[wasm_bindgen(js_name = addToken)]
    pub fn add_token(&mut self, syllable: &str, chord: &str) -> Result<bool, JsValue> {
        match self.session.add_token(syllable, chord) {
            Ok(index) => {
                wasm_log!("addToken: '{}' [{}] at {}", syllable, chord, index);
                Ok(true)
            }
            Err(NotationError::EmptySyllable) => {
                wasm_warn!("addToken: blank syllable ignored");
                Ok(false)
            }
            Err(e) => Err(to_js_error(e)),
        }
    }

    #[wasm_bindgen(js_name = removeToken)]
    pub fn remove_token(&mut self, index: usize) -> Result<(), JsValue> {
        self.session.remove_token(index).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setChord)]
    pub fn set_chord(&mut self, index: usize, chord: &str) -> Result<(), JsValue> {
        self.session.set_chord(index, chord).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearLine)]
    pub fn clear_line(&mut self) {
        self.session.clear_line();
    }

    // ------------------------------------------------------------------
    // Voices
    // ------------------------------------------------------------------

    /// Add a voice and select it. Returns the new voice id.
    #[wasm_bindgen(js_name = addVoice)]
    pub fn add_voice(&mut self, name: Option<String>) -> Result<String, JsValue> {
        let name = name.as_deref().map(parse_voice_type).transpose()?;
        let id = self.session.add_voice(name);
        wasm_info!("addVoice: {}", id);
        Ok(id.to_string())
    }

    #[wasm_bindgen(js_name = removeVoice)]
    pub fn remove_voice(&mut self, id: &str) -> Result<(), JsValue> {
        self.session.remove_voice(&voice_id(id)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = selectVoice)]
    pub fn select_voice(&mut self, id: &str) -> Result<(), JsValue> {
        self.session.select_voice(&voice_id(id)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setVoiceActive)]
    pub fn set_voice_active(&mut self, id: &str, active: bool) -> Result<(), JsValue> {
        self.session.set_voice_active(&voice_id(id), active).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setVoiceType)]
    pub fn set_voice_type(&mut self, id: &str, name: &str) -> Result<(), JsValue> {
        let name = parse_voice_type(name)?;
        self.session.set_voice_type(&voice_id(id), name).map_err(to_js_error)
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    /// Click on the staff at (x, y) for the selected voice.
    /// Returns the placement, or null when the click missed every token.
    #[wasm_bindgen(js_name = placeNoteAt)]
    pub fn place_note_at(&mut self, x: f32, y: f32) -> Result<JsValue, JsValue> {
        let placed = self.session.place_note_at(x, y).map_err(to_js_error)?;
        let placement = placed.map(|(token_index, pitch)| NotePlacement {
            token_index,
            pitch: pitch.to_string(),
        });
        serialize(&placement, "Placement serialization error")
    }

    /// Set a note from a raw Y. Returns the resolved pitch name.
    #[wasm_bindgen(js_name = setNote)]
    pub fn set_note(&mut self, index: usize, voice: &str, y: f32) -> Result<String, JsValue> {
        self.session
            .set_note(index, &voice_id(voice), y)
            .map(|p| p.to_string())
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearNote)]
    pub fn clear_note(&mut self, index: usize, voice: &str) -> Result<(), JsValue> {
        self.session.clear_note(index, &voice_id(voice)).map_err(to_js_error)
    }

    /// Returns false when there is no note to carry the accidental
    #[wasm_bindgen(js_name = setAccidental)]
    pub fn set_accidental(&mut self, index: usize, voice: &str, accidental: &str) -> Result<bool, JsValue> {
        let accidental = parse_accidental(accidental)?;
        self.session
            .set_accidental(index, &voice_id(voice), accidental)
            .map_err(to_js_error)
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, index: usize, voice: &str) -> Result<(), JsValue> {
        self.session.begin_drag(index, &voice_id(voice)).map_err(to_js_error)
    }

    /// Returns the new pitch, or undefined when no drag is active
    #[wasm_bindgen(js_name = dragTo)]
    pub fn drag_to(&mut self, y: f32) -> Result<Option<String>, JsValue> {
        self.session
            .drag_to(y)
            .map(|p| p.map(|p| p.to_string()))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.session.end_drag();
    }

    // ------------------------------------------------------------------
    // Key and blocks
    // ------------------------------------------------------------------

    /// Change the global key; transposes the line and every saved block
    #[wasm_bindgen(js_name = changeKey)]
    pub fn change_key(&mut self, key: &str) -> Result<JsValue, JsValue> {
        let delta = self.session.change_key(key);
        let result = KeyChange {
            key: self.session.document().key.to_string(),
            delta,
        };
        wasm_info!("changeKey: now {} ({:+})", result.key, delta);
        serialize(&result, "Key change serialization error")
    }

    /// Save the line as a block. Returns the block index, or undefined
    /// when the line is empty.
    #[wasm_bindgen(js_name = commitBlock)]
    pub fn commit_block(&mut self, song_type: &str, comments: &str) -> Option<u32> {
        let index = self.session.commit_block(song_type, comments);
        if index.is_none() {
            wasm_warn!("commitBlock: nothing to save");
        }
        index.map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = editBlockChord)]
    pub fn edit_block_chord(&mut self, block: usize, token: usize, chord: &str) -> Result<(), JsValue> {
        self.session
            .edit_block_chord(block, token, chord)
            .map_err(to_js_error)
    }
}
