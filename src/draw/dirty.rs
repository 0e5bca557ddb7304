//! Damage bookkeeping for one page's annotation layer.
//!
//! Hosts that present pages incrementally drain the damage after each frame. Live
//! paint contributes the box around the segment it drew; a replay damages the page.

use super::stroke::{Point, bounding_box_for_segment};
use crate::util::Rect;

#[derive(Debug, Default, Clone, PartialEq)]
enum Damage {
    #[default]
    Clean,
    Partial(Vec<Rect>),
    WholePage,
}

/// Layer damage accumulated since the host last asked.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    damage: Damage,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole layer changed (replay, clear). Earlier boxes are subsumed.
    pub fn mark_full(&mut self) {
        self.damage = Damage::WholePage;
    }

    /// Records a changed box. Ignored once the whole page is damaged.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() {
            return;
        }
        match &mut self.damage {
            Damage::WholePage => {}
            Damage::Partial(boxes) => boxes.push(rect),
            Damage::Clean => self.damage = Damage::Partial(vec![rect]),
        }
    }

    fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Records the area covered by a live-painted segment of the given pen width.
    pub fn mark_segment(&mut self, from: Point, to: Point, width: f64) {
        self.mark_optional_rect(bounding_box_for_segment(from, to, width));
    }

    pub fn is_dirty(&self) -> bool {
        self.damage != Damage::Clean
    }

    /// Hands the damage to the host and starts over clean.
    ///
    /// Whole-page damage comes back as one `width` x `height` box.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        match std::mem::take(&mut self.damage) {
            Damage::Clean => Vec::new(),
            Damage::Partial(boxes) => boxes,
            Damage::WholePage => Rect::new(0, 0, width, height).into_iter().collect(),
        }
    }
}
