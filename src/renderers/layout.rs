//! Token column layout
//!
//! Tokens are laid out left to right in non-overlapping columns whose width
//! depends only on syllable and chord text length. The same columns are used
//! to hit-test pointer X back to a token index.

use serde::{Deserialize, Serialize};

use crate::models::core::Token;

/// Sizing constants for token columns
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ColumnLayout {
    /// X of the first column when the key has no signature
    pub start_x: f32,
    pub syllable_char_width: f32,
    pub syllable_min_width: f32,
    pub chord_char_width: f32,
    pub chord_min_width: f32,
    /// Floor for the text-driven width, before padding
    pub column_min_width: f32,
    pub column_padding: f32,
    /// Floor for the whole staff width
    pub min_total_width: f32,
    /// Space kept after the last column
    pub trailing_margin: f32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            start_x: 150.0,
            syllable_char_width: 18.0,
            syllable_min_width: 36.0,
            chord_char_width: 14.0,
            chord_min_width: 24.0,
            column_min_width: 60.0,
            column_padding: 20.0,
            min_total_width: 980.0,
            trailing_margin: 120.0,
        }
    }
}

/// Horizontal extent of one token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub start_x: f32,
    pub end_x: f32,
    pub center_x: f32,
    pub width: f32,
}

impl Column {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start_x && x <= self.end_x
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    pub columns: Vec<Column>,
    pub total_width: f32,
}

impl Columns {
    /// Token under `x`, if any. Shared edges resolve to the left column.
    pub fn token_at_x(&self, x: f32) -> Option<usize> {
        self.columns.iter().position(|c| c.contains(x))
    }
}

impl ColumnLayout {
    /// Width of a column for the given texts
    pub fn column_width(&self, syllable: &str, chord: &str) -> f32 {
        let syllable_w = (syllable.chars().count() as f32 * self.syllable_char_width)
            .max(self.syllable_min_width);
        let chord_w = (chord.chars().count() as f32 * self.chord_char_width)
            .max(self.chord_min_width);

        self.column_min_width.max(syllable_w).max(chord_w) + self.column_padding
    }

    /// Lay out tokens starting at `start_x`
    pub fn build_columns(&self, tokens: &[Token], start_x: f32) -> Columns {
        let mut cursor = start_x;
        let columns = tokens
            .iter()
            .map(|t| {
                let width = self.column_width(&t.syllable, &t.chord);
                let column = Column {
                    start_x: cursor,
                    end_x: cursor + width,
                    center_x: cursor + width / 2.0,
                    width,
                };
                cursor += width;
                column
            })
            .collect();

        Columns {
            columns,
            total_width: self.min_total_width.max(cursor + self.trailing_margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::Voice;

    fn token(syllable: &str, chord: &str) -> Token {
        Token::new(syllable, chord, &Voice::presets())
    }

    #[test]
    fn test_minimum_width() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.column_width("a", ""), 80.0);
        assert_eq!(layout.column_width("", ""), 80.0);
    }

    #[test]
    fn test_width_grows_with_text() {
        let layout = ColumnLayout::default();
        // 5 chars * 18 = 90
        assert_eq!(layout.column_width("canta", ""), 110.0);
        // 7 chars * 14 = 98
        assert_eq!(layout.column_width("a", "Cmaj7/E"), 118.0);
        // counts characters, not bytes
        assert_eq!(layout.column_width("cañón", ""), 110.0);
    }

    #[test]
    fn test_columns_are_contiguous_and_ordered() {
        let layout = ColumnLayout::default();
        let tokens = vec![token("do", "C"), token("mi", "Am7"), token("corazón", "")];
        let cols = layout.build_columns(&tokens, 150.0);

        assert_eq!(cols.columns.len(), 3);
        assert_eq!(cols.columns[0].start_x, 150.0);
        for pair in cols.columns.windows(2) {
            assert_eq!(pair[0].end_x, pair[1].start_x);
            assert!(pair[0].center_x < pair[1].center_x);
        }
        for c in &cols.columns {
            assert!(c.width >= 80.0);
            assert_eq!(c.center_x, c.start_x + c.width / 2.0);
        }
    }

    #[test]
    fn test_total_width_floor() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.build_columns(&[], 150.0).total_width, 980.0);

        let tokens: Vec<Token> = (0..20).map(|_| token("la", "")).collect();
        let cols = layout.build_columns(&tokens, 150.0);
        assert_eq!(cols.total_width, 150.0 + 20.0 * 80.0 + 120.0);
    }

    #[test]
    fn test_token_at_x() {
        let layout = ColumnLayout::default();
        let tokens = vec![token("do", ""), token("re", "")];
        let cols = layout.build_columns(&tokens, 150.0);

        assert_eq!(cols.token_at_x(100.0), None);
        assert_eq!(cols.token_at_x(150.0), Some(0));
        assert_eq!(cols.token_at_x(229.0), Some(0));
        assert_eq!(cols.token_at_x(230.0), Some(0));
        assert_eq!(cols.token_at_x(231.0), Some(1));
        assert_eq!(cols.token_at_x(400.0), None);
    }
}
