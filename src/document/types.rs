//! Document source trait and errors.

use crate::draw::PageNumber;
use cairo::ImageSurface;
use std::path::PathBuf;
use thiserror::Error;

/// Something that can rasterize the pages of a document.
pub trait PageSource {
    /// Number of pages in the document. May scan or open the document.
    fn page_count(&mut self) -> Result<usize, DocumentError>;

    /// Rasterizes page `page` (1-based) at the source's render scale.
    fn render_page(&mut self, page: PageNumber) -> Result<ImageSurface, DocumentError>;
}

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to decode {}: {reason}", .path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: PageNumber, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}
