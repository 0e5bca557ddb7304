//! Freehand ink annotation for multi-page documents.
//!
//! Pages are rasterized by a [`document::PageSource`] and installed into an
//! [`input::InputState`], which turns pointer and keyboard events into strokes,
//! keeps per-page undo/redo history and exports the annotated document through
//! an [`export::FlattenWriter`].

pub mod config;
pub mod document;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use input::InputState;
