//! Stepwise installation of a document's pages.

use super::types::{DocumentError, PageSource};
use crate::draw::PageNumber;
use crate::input::InputState;
use log::{debug, info, warn};

/// Installs the pages of one document into an [`InputState`], one page per step.
///
/// Created by [`InputState::begin_load`]. Each loader is bound to the document
/// load that created it: once another document has been loaded into the same
/// state, the old loader stops without touching anything.
pub struct DocumentLoader<S> {
    source: S,
    generation: u64,
    page_count: usize,
    next_page: PageNumber,
    finished: bool,
}

impl<S: PageSource> DocumentLoader<S> {
    pub(crate) fn new(source: S, generation: u64, page_count: usize) -> Self {
        Self {
            source,
            generation,
            page_count,
            next_page: 1,
            finished: page_count == 0,
        }
    }

    /// Total number of pages announced by the source.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Pages installed so far.
    pub fn pages_loaded(&self) -> usize {
        self.next_page - 1
    }

    /// Whether no further page will be installed (done, failed or superseded).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rasterizes and installs the next page.
    ///
    /// Returns the installed page number, or `None` once every page is in. A
    /// failing page ends the load; pages installed before it stay usable.
    pub fn load_next_page(
        &mut self,
        state: &mut InputState,
    ) -> Result<Option<PageNumber>, DocumentError> {
        if self.finished {
            return Ok(None);
        }
        if state.document_generation() != self.generation {
            warn!(
                "Discarding stale document load after {} of {} pages",
                self.pages_loaded(),
                self.page_count
            );
            self.finished = true;
            return Ok(None);
        }

        let page = self.next_page;
        let raster = match self.source.render_page(page) {
            Ok(raster) => raster,
            Err(err) => {
                self.finished = true;
                return Err(err);
            }
        };
        if let Err(err) = state.install_page(raster) {
            self.finished = true;
            return Err(err);
        }

        debug!("Page {} of {} ready", page, self.page_count);
        self.next_page += 1;
        if self.next_page > self.page_count {
            self.finished = true;
            info!("Document loaded ({} pages)", self.page_count);
        }
        Ok(Some(page))
    }

    /// Installs every remaining page. Returns how many were installed by this call.
    pub fn load_remaining(&mut self, state: &mut InputState) -> Result<usize, DocumentError> {
        let mut installed = 0;
        while self.load_next_page(state)?.is_some() {
            installed += 1;
        }
        Ok(installed)
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
