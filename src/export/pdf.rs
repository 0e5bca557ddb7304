//! PDF output through Cairo's PDF surface.

use super::types::{ExportError, FlattenWriter};
use cairo::{Context, ImageSurface, PdfSurface};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one PDF page per flattened page.
///
/// Pages were rasterized at `render_scale`, so each page is sized
/// `pixels / render_scale` points and the raster is drawn scaled down to fit.
pub struct PdfWriter {
    path: PathBuf,
    render_scale: f64,
    surface: Option<PdfSurface>,
    pages: usize,
}

impl PdfWriter {
    pub fn new(path: impl Into<PathBuf>, render_scale: f64) -> Self {
        Self {
            path: path.into(),
            render_scale,
            surface: None,
            pages: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }
}

impl FlattenWriter for PdfWriter {
    fn add_page(&mut self, page: &ImageSurface) -> Result<(), ExportError> {
        let scale = self.render_scale;
        let width_pt = page.width() as f64 / scale;
        let height_pt = page.height() as f64 / scale;

        // A failed resize leaves the surface in place so `finish` reports the error
        let surface = match &self.surface {
            Some(surface) => {
                surface.set_size(width_pt, height_pt)?;
                surface.clone()
            }
            None => {
                let surface = PdfSurface::new(width_pt, height_pt, &self.path)?;
                self.surface = Some(surface.clone());
                surface
            }
        };

        let ctx = Context::new(&surface)?;
        ctx.scale(1.0 / scale, 1.0 / scale);
        ctx.set_source_surface(page, 0.0, 0.0)?;
        ctx.paint()?;
        ctx.show_page()?;

        self.pages += 1;
        debug!(
            "PDF page {}: {:.1}x{:.1} pt from {}x{} px",
            self.pages,
            width_pt,
            height_pt,
            page.width(),
            page.height()
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<PathBuf, ExportError> {
        let surface = self.surface.take().ok_or(ExportError::NothingToExport)?;
        surface.finish();
        surface
            .status()
            .map_err(|err| ExportError::Encode(err.to_string()))?;

        let written = fs::metadata(&self.path)?.len();
        info!(
            "Exported {} page(s) to {} ({} bytes)",
            self.pages,
            self.path.display(),
            written
        );
        Ok(self.path.clone())
    }
}
