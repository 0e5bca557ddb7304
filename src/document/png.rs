//! A document made of pre-rendered page images.

use super::types::{DocumentError, PageSource};
use crate::draw::PageNumber;
use cairo::{Context, Format, ImageSurface};
use log::{debug, info};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Reads a directory of PNG files as a document, one file per page.
///
/// Files are ordered by name, so `page-01.png`, `page-02.png`, ... load in
/// order. Each image is scaled by `render_scale` when rasterized.
#[derive(Debug)]
pub struct PngPageSource {
    directory: PathBuf,
    render_scale: f64,
    files: Option<Vec<PathBuf>>,
}

impl PngPageSource {
    pub fn new(directory: impl Into<PathBuf>, render_scale: f64) -> Self {
        Self {
            directory: directory.into(),
            render_scale,
            files: None,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn scan(&mut self) -> Result<&[PathBuf], DocumentError> {
        if self.files.is_none() {
            let entries =
                fs::read_dir(&self.directory).map_err(|err| DocumentError::DecodeFailure {
                    path: self.directory.clone(),
                    reason: err.to_string(),
                })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                let is_png = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
                if is_png && path.is_file() {
                    files.push(path);
                }
            }
            files.sort();

            info!(
                "Found {} page image(s) in {}",
                files.len(),
                self.directory.display()
            );
            self.files = Some(files);
        }
        Ok(self.files.as_deref().unwrap_or_default())
    }
}

impl PageSource for PngPageSource {
    fn page_count(&mut self) -> Result<usize, DocumentError> {
        Ok(self.scan()?.len())
    }

    fn render_page(&mut self, page: PageNumber) -> Result<ImageSurface, DocumentError> {
        let render_scale = self.render_scale;
        let files = self.scan()?;
        let path = page
            .checked_sub(1)
            .and_then(|index| files.get(index))
            .ok_or(DocumentError::PageOutOfRange {
                page,
                count: files.len(),
            })?
            .clone();

        let decode_failure = |reason: String| DocumentError::DecodeFailure {
            path: path.clone(),
            reason,
        };

        let mut file = File::open(&path).map_err(|err| decode_failure(err.to_string()))?;
        let image = ImageSurface::create_from_png(&mut file)
            .map_err(|err| decode_failure(err.to_string()))?;
        debug!(
            "Decoded page {} from {} ({}x{})",
            page,
            path.display(),
            image.width(),
            image.height()
        );

        scale_surface(&image, render_scale)
    }
}

/// Returns `image` resampled by `scale` (a plain copy in ARGB32 at scale 1).
fn scale_surface(image: &ImageSurface, scale: f64) -> Result<ImageSurface, DocumentError> {
    let width = ((image.width() as f64) * scale).round().max(1.0) as i32;
    let height = ((image.height() as f64) * scale).round().max(1.0) as i32;

    let scaled = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let ctx = Context::new(&scaled)?;
        ctx.scale(scale, scale);
        ctx.set_source_surface(image, 0.0, 0.0)?;
        ctx.paint()?;
    }
    scaled.flush();
    Ok(scaled)
}
