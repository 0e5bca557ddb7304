//! Flattening annotated pages into an output document.
//!
//! Export merges each page's base raster with its annotation layer and hands
//! the result to a [`FlattenWriter`], one output page per document page.

pub mod file;
pub mod pdf;
pub mod types;

pub use file::{ensure_directory_exists, expand_tilde, generate_filename, output_path};
pub use pdf::PdfWriter;
pub use types::{ExportError, FlattenWriter};
