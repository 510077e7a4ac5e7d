//! Error types for the notation core
//!
//! Two families live here. Input conditions (bad note names, free-text
//! chords, pitches off the staff) are recovered silently by the engine and
//! only surface from the parsing helpers. Contract violations (unknown voice
//! ids, out-of-range token or block indices) propagate to the caller.

use thiserror::Error;

/// Errors raised by the notation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Letter/accidental text that is not a note name
    #[error("Unknown note name: '{0}'")]
    UnknownNoteName(String),

    /// Chord text that does not follow root[quality][/bass]
    #[error("Unparseable chord: '{0}'")]
    UnparseableChord(String),

    /// Absolute pitch outside the drawable staff window
    #[error("Pitch {0} is outside the staff range")]
    OutOfRangePitch(i32),

    /// Key name outside the twelve supported keys
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    /// Voice-type label outside the fixed vocabulary
    #[error("Unknown voice type: '{0}'")]
    UnknownVoiceType(String),

    #[error("Voice '{0}' not found")]
    UnknownVoice(String),

    #[error("Token index {index} out of bounds (len: {len})")]
    TokenIndexOutOfRange { index: usize, len: usize },

    #[error("Block index {index} out of bounds (len: {len})")]
    BlockIndexOutOfRange { index: usize, len: usize },

    /// Tokens must carry a non-blank syllable
    #[error("Syllable must not be empty")]
    EmptySyllable,
}

impl NotationError {
    /// True for conditions the engine recovers from without involving the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NotationError::UnknownNoteName(_)
                | NotationError::UnparseableChord(_)
                | NotationError::OutOfRangePitch(_)
                | NotationError::UnknownKey(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(NotationError::UnparseableChord("N.C.".into()).is_recoverable());
        assert!(NotationError::OutOfRangePitch(99).is_recoverable());
        assert!(!NotationError::UnknownVoice("tenor".into()).is_recoverable());
        assert!(!NotationError::TokenIndexOutOfRange { index: 3, len: 1 }.is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = NotationError::TokenIndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Token index 4 out of bounds (len: 2)");
        assert_eq!(
            NotationError::UnknownNoteName("H".into()).to_string(),
            "Unknown note name: 'H'"
        );
    }
}
