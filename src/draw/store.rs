//! Per-page stroke storage.

use super::stroke::{Stroke, StrokeId};
use log::warn;
use std::collections::BTreeMap;

/// 1-based page number as shown to the user.
pub type PageNumber = usize;

/// Ordered record of committed strokes, one list per page.
///
/// Append order is paint order (first = bottom, last = top). Entries are only
/// ever appended or removed, never reordered. Page lists are created lazily on
/// first write, so pages nobody drew on cost nothing.
#[derive(Debug, Default)]
pub struct StrokeStore {
    pages: BTreeMap<PageNumber, Vec<Stroke>>,
    next_id: u64,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh stroke identity. Identities are never reused, even across
    /// [`reset_all`](Self::reset_all).
    pub fn allocate_id(&mut self) -> StrokeId {
        self.next_id += 1;
        StrokeId(self.next_id)
    }

    /// Strokes of a page in paint order (empty if the page has none).
    pub fn strokes(&self, page: PageNumber) -> &[Stroke] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, page: PageNumber) -> usize {
        self.strokes(page).len()
    }

    pub fn is_empty(&self, page: PageNumber) -> bool {
        self.strokes(page).is_empty()
    }

    pub fn contains(&self, page: PageNumber, id: StrokeId) -> bool {
        self.strokes(page).iter().any(|s| s.id() == id)
    }

    /// Appends a newly committed stroke on top of the page.
    ///
    /// Returns `false` (and stores nothing) if a stroke with the same identity is
    /// already on the page.
    pub fn append(&mut self, page: PageNumber, stroke: Stroke) -> bool {
        self.insert_tail(page, stroke)
    }

    /// Removes the stroke at `index` in paint order. Used by the stroke eraser only.
    pub fn remove_at(&mut self, page: PageNumber, index: usize) -> Option<Stroke> {
        let strokes = self.pages.get_mut(&page)?;
        if index < strokes.len() {
            Some(strokes.remove(index))
        } else {
            None
        }
    }

    /// Removes and returns the topmost stroke. Used by undo only.
    pub fn pop_last(&mut self, page: PageNumber) -> Option<Stroke> {
        self.pages.get_mut(&page)?.pop()
    }

    /// Puts a stroke back on top of the page. Used by redo only.
    pub fn push_back(&mut self, page: PageNumber, stroke: Stroke) -> bool {
        self.insert_tail(page, stroke)
    }

    /// Drops every page's strokes (new document loaded).
    pub fn reset_all(&mut self) {
        self.pages.clear();
    }

    fn insert_tail(&mut self, page: PageNumber, stroke: Stroke) -> bool {
        let strokes = self.pages.entry(page).or_default();
        if strokes.iter().any(|s| s.id() == stroke.id()) {
            warn!(
                "Stroke {:?} already present on page {}; refusing duplicate",
                stroke.id(),
                page
            );
            return false;
        }
        strokes.push(stroke);
        true
    }
}
