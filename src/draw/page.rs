//! Per-page raster surfaces: the decoded page image and its annotation layer.

use super::dirty::DirtyTracker;
use super::render::{self, LiveBrush, PageRedraw};
use super::store::PageNumber;
use super::stroke::{Point, Stroke};
use crate::util::Rect;
use cairo::{Context, ImageSurface};
use log::{debug, warn};

/// Surfaces owned by one page.
///
/// The base raster comes from the page source and is never drawn on. The
/// annotation layer has the same size and holds everything the user inked.
pub struct PageCanvas {
    base: ImageSurface,
    layer: ImageSurface,
    dirty: DirtyTracker,
}

impl PageCanvas {
    /// Wraps a rasterized page and allocates a transparent annotation layer for it.
    pub fn new(base: ImageSurface) -> Result<Self, cairo::Error> {
        let layer = ImageSurface::create(cairo::Format::ARgb32, base.width(), base.height())?;
        let mut dirty = DirtyTracker::new();
        dirty.mark_full();
        Ok(Self { base, layer, dirty })
    }

    pub fn base(&self) -> &ImageSurface {
        &self.base
    }

    pub fn layer(&self) -> &ImageSurface {
        &self.layer
    }

    pub fn width(&self) -> i32 {
        self.base.width()
    }

    pub fn height(&self) -> i32 {
        self.base.height()
    }

    /// Drains damage accumulated since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let (width, height) = (self.width(), self.height());
        self.dirty.take_regions(width, height)
    }

    /// Repaints the annotation layer from scratch.
    pub fn replay(&mut self, strokes: &[Stroke]) {
        if let Err(err) = render::render_page(&self.layer, strokes) {
            warn!("Failed to replay annotation layer: {err}");
        }
        self.dirty.mark_full();
    }

    /// Live-paints one segment straight onto the annotation layer.
    pub fn paint_segment(&mut self, brush: &LiveBrush, from: Point, to: Point) {
        match Context::new(&self.layer) {
            Ok(ctx) => render::paint_live_segment(&ctx, brush, from, to),
            Err(err) => {
                warn!("Failed to create context for live paint: {err}");
                return;
            }
        }
        self.layer.flush();
        self.dirty.mark_segment(from, to, brush.width());
    }

    /// Live-paints a single-point gesture as a dot.
    pub fn paint_dot(&mut self, brush: &LiveBrush, at: Point) {
        match Context::new(&self.layer) {
            Ok(ctx) => render::paint_live_dot(&ctx, brush, at),
            Err(err) => {
                warn!("Failed to create context for live paint: {err}");
                return;
            }
        }
        self.layer.flush();
        self.dirty.mark_segment(at, at, brush.width());
    }

    /// Merged base + annotations, as handed to the export writer.
    pub fn flatten(&self) -> Result<ImageSurface, cairo::Error> {
        render::flatten_page(&self.base, &self.layer)
    }
}

/// All page canvases of the loaded document, installed in page order.
///
/// Pages become available one by one while the document loads; a page that is
/// not installed yet simply does not exist from the caller's point of view.
#[derive(Default)]
pub struct PageSurfaces {
    pages: Vec<PageCanvas>,
}

impl PageSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages installed so far.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Adds the next page. Pages must be installed in order, starting at page 1.
    pub fn install(&mut self, base: ImageSurface) -> Result<PageNumber, cairo::Error> {
        let canvas = PageCanvas::new(base)?;
        self.pages.push(canvas);
        let page = self.pages.len();
        debug!(
            "Installed page {} ({}x{})",
            page,
            self.pages[page - 1].width(),
            self.pages[page - 1].height()
        );
        Ok(page)
    }

    pub fn get(&self, page: PageNumber) -> Option<&PageCanvas> {
        page.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn get_mut(&mut self, page: PageNumber) -> Option<&mut PageCanvas> {
        page.checked_sub(1).and_then(|i| self.pages.get_mut(i))
    }

    /// Iterates `(page, canvas)` in page order.
    pub fn iter(&self) -> impl Iterator<Item = (PageNumber, &PageCanvas)> {
        self.pages.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    /// Drops every page (new document loaded).
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

impl PageRedraw for PageSurfaces {
    fn redraw_page(&mut self, page: PageNumber, strokes: &[Stroke]) {
        match self.get_mut(page) {
            Some(canvas) => canvas.replay(strokes),
            None => debug!("Redraw requested for page {page}, which is not loaded"),
        }
    }
}
