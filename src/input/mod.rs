//! Input handling and gesture state machines.
//!
//! This module turns host pointer and keyboard events into strokes. It holds
//! the user's selection (mode, color, width), one gesture session per page and
//! the document being annotated.

pub mod events;
pub mod mode;
pub mod modifiers;
pub mod session;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Key, PointerKind};
pub use mode::DrawMode;
pub use modifiers::Modifiers;
pub use session::{DrawingSession, HighlighterSettings};
pub use state::InputState;
