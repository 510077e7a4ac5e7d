//! Models module for the choral editor
//!
//! Pitch algebra, the key vocabulary and signature registry, the
//! token/voice document, and the editing session that ties them together.

pub mod pitch;
pub mod key;
pub mod key_signature;
pub mod core;
pub mod serde_helpers;
pub mod editor_state;

// Re-export commonly used types
pub use pitch::{Accidental, Letter, NoteName, StaffPitch};
pub use key::Key;
pub use key_signature::{KeySignature, SignatureType};
pub use self::core::*;
pub use editor_state::{DragSession, EditorSession};
