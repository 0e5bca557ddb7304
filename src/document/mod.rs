//! Page sources and stepwise document loading.
//!
//! A [`PageSource`] knows how many pages a document has and rasterizes one page
//! at a time. The [`DocumentLoader`] installs those rasters into an
//! [`InputState`](crate::input::InputState) in order, so page 1 is interactive
//! before the last page has been decoded.

pub mod blank;
pub mod loader;
pub mod png;
pub mod types;

pub use blank::BlankPageSource;
pub use loader::DocumentLoader;
pub use png::PngPageSource;
pub use types::{DocumentError, PageSource};
