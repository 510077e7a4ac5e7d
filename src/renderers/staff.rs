//! Staff coordinate mapping
//!
//! The vertical axis is diatonic: one step is one letter name (a line or the
//! adjacent space). Sharps and flats never move a note vertically.
//!
//! Steps are counted from the lowest drawable pitch (C3) up to B5, which
//! covers the treble staff plus ledger lines on either side.

use serde::{Deserialize, Serialize};

use crate::error::{NotationError, Result};
use crate::models::pitch::{Letter, StaffPitch};

/// Lowest drawable pitch
pub const LOWEST_PITCH: StaffPitch = StaffPitch { letter: Letter::C, octave: 3 };

/// Highest drawable pitch
pub const HIGHEST_PITCH: StaffPitch = StaffPitch { letter: Letter::B, octave: 5 };

/// Number of drawable diatonic steps (C3..=B5)
pub const STEP_COUNT: usize = 21;

/// Number of lines in the staff body
pub const STAFF_LINE_COUNT: usize = 5;

/// Vertical geometry of the staff, in SVG user units
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StaffGeometry {
    /// Y of step 0 (C3)
    pub base_y: f32,
    /// Distance between adjacent steps (half a line spacing)
    pub step_height: f32,
    /// Y of the top staff line (F5)
    pub top_line_y: f32,
    /// Y of the bottom staff line (E4)
    pub bottom_line_y: f32,
    /// Distance between staff lines, also used between ledger lines
    pub line_spacing: f32,
    /// Half the length of a ledger line
    pub ledger_half_width: f32,
    /// X where staff lines start, right of the clef
    pub staff_left_x: f32,
    /// X of the clef glyph
    pub clef_x: f32,
}

impl Default for StaffGeometry {
    fn default() -> Self {
        Self {
            base_y: 320.0,
            step_height: 10.0,
            top_line_y: 150.0,
            bottom_line_y: 230.0,
            line_spacing: 20.0,
            ledger_half_width: 12.0,
            staff_left_x: 100.0,
            clef_x: 28.0,
        }
    }
}

/// Pitch at a step index, if the index is inside the staff range
pub fn pitch_at_step(index: usize) -> Option<StaffPitch> {
    (index < STEP_COUNT)
        .then(|| StaffPitch::from_diatonic_number(LOWEST_PITCH.diatonic_number() + index as i32))
}

/// Step index of a pitch, if it is drawable
pub fn step_index_of(pitch: StaffPitch) -> Option<usize> {
    let offset = pitch.diatonic_number() - LOWEST_PITCH.diatonic_number();
    usize::try_from(offset).ok().filter(|&i| i < STEP_COUNT)
}

/// Every drawable pitch, bottom to top
pub fn staff_pitches() -> Vec<StaffPitch> {
    (0..STEP_COUNT).filter_map(pitch_at_step).collect()
}

/// Lowest representable absolute pitch (C3 natural)
pub fn lowest_absolute() -> i32 {
    LOWEST_PITCH.natural_absolute()
}

/// Highest representable absolute pitch (B5 natural)
pub fn highest_absolute() -> i32 {
    HIGHEST_PITCH.natural_absolute()
}

/// The absolute pitch itself when it lies inside the drawable window
pub fn checked_absolute(absolute: i32) -> Result<i32> {
    if (lowest_absolute()..=highest_absolute()).contains(&absolute) {
        Ok(absolute)
    } else {
        Err(NotationError::OutOfRangePitch(absolute))
    }
}

/// Clamp an absolute pitch into the drawable window
pub fn clamp_absolute(absolute: i32) -> i32 {
    checked_absolute(absolute).unwrap_or_else(|e| {
        let clamped = absolute.clamp(lowest_absolute(), highest_absolute());
        log::warn!("{}, clamped to {}", e, clamped);
        clamped
    })
}

impl StaffGeometry {
    /// `base_y - index * step_height`
    pub fn step_index_to_y(&self, index: usize) -> f32 {
        self.base_y - index as f32 * self.step_height
    }

    /// Nearest step for a Y coordinate, clamped into the staff range.
    ///
    /// Out-of-range gestures snap to the nearest drawable pitch.
    pub fn y_to_step_index(&self, y: f32) -> usize {
        let raw = ((self.base_y - y) / self.step_height).round();
        if raw.is_nan() || raw <= 0.0 {
            return 0;
        }
        (raw as usize).min(STEP_COUNT - 1)
    }

    pub fn pitch_to_y(&self, pitch: StaffPitch) -> Option<f32> {
        step_index_of(pitch).map(|i| self.step_index_to_y(i))
    }

    pub fn y_to_pitch(&self, y: f32) -> StaffPitch {
        let index = self.y_to_step_index(y);
        StaffPitch::from_diatonic_number(LOWEST_PITCH.diatonic_number() + index as i32)
    }

    /// Y of each staff line, top to bottom
    pub fn staff_line_ys(&self) -> Vec<f32> {
        (0..STAFF_LINE_COUNT)
            .map(|i| self.top_line_y + i as f32 * self.line_spacing)
            .collect()
    }

    /// Ledger lines needed for a note drawn at `y`.
    ///
    /// Lines run from the staff boundary outward to the note, one every
    /// `line_spacing`. Notes inside the staff body get none.
    pub fn ledger_lines(&self, y: f32) -> Vec<f32> {
        let mut lines = Vec::new();

        if y < self.top_line_y {
            let mut ly = self.top_line_y - self.line_spacing;
            while ly >= y {
                lines.push(ly);
                ly -= self.line_spacing;
            }
        } else if y > self.bottom_line_y {
            let mut ly = self.bottom_line_y + self.line_spacing;
            while ly <= y {
                lines.push(ly);
                ly += self.line_spacing;
            }
        }

        lines
    }
}
