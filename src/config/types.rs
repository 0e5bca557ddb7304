//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::DrawMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing defaults applied when a document is opened.
///
/// Users can change these at runtime with keybindings or the host's selectors.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a named color, a hex string like `"#ff0000"` or an RGB array
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Mode selected at startup (pen, highlighter, pixel-eraser, stroke-eraser)
    #[serde(default)]
    pub default_mode: DrawMode,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            default_mode: DrawMode::default(),
        }
    }
}

/// Highlighter appearance.
///
/// The highlighter is drawn two ways: while the gesture is in progress it paints
/// `live_color` multiplied at `live_opacity`; the committed stroke is replayed
/// with `color` at `alpha`, multiplied as well.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HighlighterConfig {
    /// Highlighter width in pixels, independent of the pen width (valid range: 1.0 - 100.0)
    #[serde(default = "default_highlighter_width")]
    pub width: f64,

    /// Color used for live feedback while drawing
    #[serde(default = "default_highlighter_color")]
    pub live_color: ColorSpec,

    /// Opacity of live feedback (valid range: 0.0 - 1.0)
    #[serde(default = "default_live_opacity")]
    pub live_opacity: f64,

    /// Color recorded on the committed stroke
    #[serde(default = "default_highlighter_color")]
    pub color: ColorSpec,

    /// Alpha recorded on the committed stroke (valid range: 0.0 - 1.0)
    #[serde(default = "default_highlighter_alpha")]
    pub alpha: f64,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            width: default_highlighter_width(),
            live_color: default_highlighter_color(),
            live_opacity: default_live_opacity(),
            color: default_highlighter_color(),
            alpha: default_highlighter_alpha(),
        }
    }
}

/// Eraser behavior.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// A press in stroke-eraser mode removes the first stroke with a recorded
    /// point closer than this many pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_stroke_hit_radius")]
    pub stroke_hit_radius: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            stroke_hit_radius: default_stroke_hit_radius(),
        }
    }
}

/// Page rasterization settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DocumentConfig {
    /// Scale applied when rasterizing pages; also maps raster pixels back to
    /// points on export (valid range: 0.25 - 8.0)
    #[serde(default = "default_render_scale")]
    pub render_scale: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            render_scale: default_render_scale(),
        }
    }
}

/// Export destination settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory the annotated PDF is written to (supports `~`)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// File name without extension; chrono format specifiers like `%Y-%m-%d` are expanded
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

/// Pointer input filtering.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Ignore finger touches so they can scroll the page; only mouse and stylus draw
    #[serde(default = "default_ignore_finger_touch")]
    pub ignore_finger_touch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            ignore_finger_touch: default_ignore_finger_touch(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#ff0000".to_string())
}

fn default_width() -> f64 {
    2.0
}

fn default_highlighter_width() -> f64 {
    20.0
}

fn default_highlighter_color() -> ColorSpec {
    ColorSpec::Rgb([255, 255, 0])
}

fn default_live_opacity() -> f64 {
    0.6
}

fn default_highlighter_alpha() -> f64 {
    0.3
}

fn default_stroke_hit_radius() -> f64 {
    10.0
}

fn default_render_scale() -> f64 {
    1.5
}

fn default_export_directory() -> String {
    ".".to_string()
}

fn default_filename_template() -> String {
    "annotated".to_string()
}

fn default_ignore_finger_touch() -> bool {
    true
}
