use std::path::PathBuf;
use uuid::Uuid;

use crate::canvas::CanvasState;
use crate::components::tools::{BrushState, StrokeTracker};

/// Single open document: one canvas plus the brush and stroke state that
/// belong to it.
///
/// The canvas-size dialog spawns a new `Document` rather than resizing in
/// place; the previous document stays open and independent.
pub struct Document {
    pub id: Uuid,
    /// Display name ("Untitled-N").
    pub name: String,
    pub canvas: CanvasState,
    pub brush: BrushState,
    pub tracker: StrokeTracker,
    /// `None` until the first successful save.
    pub path: Option<PathBuf>,
    pub is_dirty: bool,
}

impl Document {
    pub fn new_untitled(untitled_counter: usize, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("Untitled-{}", untitled_counter),
            canvas: CanvasState::new(width, height),
            brush: BrushState::default(),
            tracker: StrokeTracker::default(),
            path: None,
            is_dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    /// Tab label (name with unsaved-changes indicator).
    pub fn display_title(&self) -> String {
        if self.is_dirty {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}
