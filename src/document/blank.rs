//! Blank pages of a fixed size, for annotating without a source document.

use super::types::{DocumentError, PageSource};
use crate::draw::PageNumber;
use cairo::{Context, Format, ImageSurface};

/// A document of `count` white pages.
#[derive(Debug, Clone, Copy)]
pub struct BlankPageSource {
    count: usize,
    width: i32,
    height: i32,
}

impl BlankPageSource {
    pub fn new(count: usize, width: i32, height: i32) -> Self {
        Self {
            count,
            width,
            height,
        }
    }

    /// A4 portrait at 72 dpi, scaled by `render_scale`.
    pub fn a4(count: usize, render_scale: f64) -> Self {
        Self::new(
            count,
            (595.0 * render_scale).round() as i32,
            (842.0 * render_scale).round() as i32,
        )
    }
}

impl PageSource for BlankPageSource {
    fn page_count(&mut self) -> Result<usize, DocumentError> {
        Ok(self.count)
    }

    fn render_page(&mut self, page: PageNumber) -> Result<ImageSurface, DocumentError> {
        if page == 0 || page > self.count {
            return Err(DocumentError::PageOutOfRange {
                page,
                count: self.count,
            });
        }
        let surface = ImageSurface::create(Format::ARgb32, self.width, self.height)?;
        {
            let ctx = Context::new(&surface)?;
            ctx.set_source_rgb(1.0, 1.0, 1.0);
            ctx.paint()?;
        }
        surface.flush();
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_white_pages_in_range() {
        let mut source = BlankPageSource::new(2, 8, 6);
        assert_eq!(source.page_count().unwrap(), 2);

        let mut page = source.render_page(2).unwrap();
        assert_eq!((page.width(), page.height()), (8, 6));
        let data = page.data().unwrap();
        assert!(data.iter().all(|byte| *byte == 0xff));
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let mut source = BlankPageSource::new(1, 8, 6);
        assert!(matches!(
            source.render_page(2),
            Err(DocumentError::PageOutOfRange { page: 2, count: 1 })
        ));
        assert!(source.render_page(0).is_err());
    }

    #[test]
    fn a4_scales_with_render_scale() {
        let page = BlankPageSource::a4(1, 1.5).render_page(1).unwrap();
        assert_eq!(page.width(), 893);
        assert_eq!(page.height(), 1263);
    }
}
