//! Stroke model and Cairo rendering for page annotations.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`]: one committed freehand gesture
//! - [`StrokeStore`]: per-page ordered stroke lists, the source of truth for replay
//! - [`PageSurfaces`]: per-page base raster and annotation layer
//! - Replay and live-paint rendering functions

pub mod color;
pub mod dirty;
pub mod page;
pub mod render;
pub mod store;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use hit_test::{erase_stroke_at, find_stroke_near};
pub use page::{PageCanvas, PageSurfaces};
pub use render::{LiveBrush, PageRedraw, flatten_page, render_page, render_stroke};
pub use store::{PageNumber, StrokeStore};
pub use stroke::{CompositeMode, Point, Stroke, StrokeId};

pub use color::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
