//! Renderers module for the choral editor
//!
//! Pure geometry for drawing a staff: the diatonic coordinate mapper, the
//! token column layout, and the display list handed to the UI.

pub mod staff;
pub mod layout;
pub mod display_list;

// Re-export commonly used types
pub use staff::StaffGeometry;
pub use layout::{Column, ColumnLayout, Columns};
pub use display_list::{build_scene, StaffScene};
