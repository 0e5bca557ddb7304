//! Draw mode selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a pointer gesture does on a page.
///
/// The mode is sampled once when a gesture starts; changing it mid-gesture
/// affects only the next gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DrawMode {
    /// Freehand ink with the selected color and width
    #[default]
    Pen,
    /// Translucent yellow highlighter at a fixed width
    Highlighter,
    /// Rubs pixels off the annotation layer (not undoable, lost on repaint)
    PixelEraser,
    /// Removes the first stroke near the pointer on press
    StrokeEraser,
}

impl DrawMode {
    /// Whether gestures in this mode produce a stroke.
    pub fn captures_strokes(&self) -> bool {
        matches!(self, DrawMode::Pen | DrawMode::Highlighter)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawMode::Pen => "Pen",
            DrawMode::Highlighter => "Highlighter",
            DrawMode::PixelEraser => "Pixel eraser",
            DrawMode::StrokeEraser => "Stroke eraser",
        }
    }
}
