use crate::document::{DocumentError, DocumentLoader, PageSource};
use crate::draw::PageNumber;
use crate::export::{ExportError, FlattenWriter};
use crate::input::session::DrawingSession;
use cairo::ImageSurface;
use log::{info, warn};
use std::path::PathBuf;

use super::InputState;

impl InputState {
    /// Starts loading a new document.
    ///
    /// Asks the source for its page count first. If that fails, or the document
    /// has no pages, the error is returned and the current document stays as it
    /// was. Otherwise every page's strokes, history, surfaces and gestures are
    /// discarded, page 1 becomes active, and the returned loader installs pages
    /// one at a time.
    pub fn begin_load<S: PageSource>(
        &mut self,
        mut source: S,
    ) -> Result<DocumentLoader<S>, DocumentError> {
        let page_count = source.page_count()?;
        if page_count == 0 {
            return Err(DocumentError::EmptyDocument);
        }

        self.store.reset_all();
        self.history.reset_all();
        self.surfaces.clear();
        self.sessions = (0..page_count).map(|_| DrawingSession::new()).collect();
        self.page_count = page_count;
        self.active_page = Some(1);
        self.document_generation += 1;
        self.needs_redraw = true;

        info!("Loading document with {page_count} page(s)");
        Ok(DocumentLoader::new(source, self.document_generation, page_count))
    }

    /// Loads a whole document. Returns the number of pages installed.
    ///
    /// If a page fails to rasterize, the pages before it remain loaded and usable.
    pub fn load_document<S: PageSource>(&mut self, source: S) -> Result<usize, DocumentError> {
        let mut loader = self.begin_load(source)?;
        loader.load_remaining(self)?;
        Ok(loader.pages_loaded())
    }

    pub(crate) fn document_generation(&self) -> u64 {
        self.document_generation
    }

    /// Installs the next page raster. Called by [`DocumentLoader`].
    pub(crate) fn install_page(&mut self, raster: ImageSurface) -> Result<PageNumber, DocumentError> {
        if self.surfaces.len() >= self.page_count {
            return Err(DocumentError::PageOutOfRange {
                page: self.surfaces.len() + 1,
                count: self.page_count,
            });
        }
        let page = self.surfaces.install(raster)?;
        self.needs_redraw = true;
        Ok(page)
    }

    /// Flattens every installed page (base raster + annotations) into `writer`.
    ///
    /// Gestures still in progress are not part of the export: only what is on
    /// the annotation layers is merged. Returns the writer's output path.
    pub fn export(&self, writer: &mut dyn FlattenWriter) -> Result<PathBuf, ExportError> {
        if self.surfaces.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        if self.surfaces.len() < self.page_count {
            warn!(
                "Exporting {} of {} pages; the rest have not loaded",
                self.surfaces.len(),
                self.page_count
            );
        }

        for (_, canvas) in self.surfaces.iter() {
            let merged = canvas.flatten()?;
            writer.add_page(&merged)?;
        }
        writer.finish()
    }
}
