//! Export writer trait and errors.

use cairo::ImageSurface;
use std::path::PathBuf;
use thiserror::Error;

/// Receives flattened pages in page order and produces a file.
pub trait FlattenWriter {
    /// Appends one page. The image is the merged base raster and annotation layer.
    fn add_page(&mut self, page: &ImageSurface) -> Result<(), ExportError>;

    /// Completes the output and returns where it was written.
    fn finish(&mut self) -> Result<PathBuf, ExportError>;
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No pages to export")]
    NothingToExport,

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Encode(String),
}
