//! Stroke definitions for page annotations.

use super::color::Color;
use crate::util::Rect;

/// A point in page-local raster coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        crate::util::distance(self.x, self.y, other.x, other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Identity of a committed stroke, allocated by the [`StrokeStore`](super::StrokeStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(pub u64);

/// How a stroke's pixels combine with what is already on the annotation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    /// Pen ink, painted over existing pixels
    Normal,
    /// Highlighter ink, multiplied with existing pixels
    Highlight,
}

/// One completed freehand gesture.
///
/// A stroke always holds at least one point and a positive width; a single point
/// renders as a dot. Strokes are immutable once committed.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    color: Color,
    width: f64,
    composite: CompositeMode,
}

impl Stroke {
    /// Builds a stroke, returning `None` for an empty point list or a non-positive width.
    pub fn new(
        id: StrokeId,
        points: Vec<Point>,
        color: Color,
        width: f64,
        composite: CompositeMode,
    ) -> Option<Self> {
        if points.is_empty() || !(width > 0.0) {
            return None;
        }
        Some(Self {
            id,
            points,
            color,
            width,
            composite,
        })
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Points in capture order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn composite(&self) -> CompositeMode {
        self.composite
    }

    /// Returns the axis-aligned bounding box, expanded to cover the stroke width.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.width)
    }
}

fn stroke_padding(width: f64) -> f64 {
    (width / 2.0).ceil().max(1.0)
}

/// Bounding box of a polyline drawn with round caps at the given width.
pub(crate) fn bounding_box_for_points(points: &[Point], width: f64) -> Option<Rect> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let padding = stroke_padding(width);
    ensure_positive_rect(
        min_x - padding,
        min_y - padding,
        max_x + padding,
        max_y + padding,
    )
}

/// Bounding box of a single segment drawn with round caps.
pub(crate) fn bounding_box_for_segment(from: Point, to: Point, width: f64) -> Option<Rect> {
    bounding_box_for_points(&[from, to], width)
}

fn ensure_positive_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Rect> {
    let min_x = min_x.floor() as i32;
    let min_y = min_y.floor() as i32;
    let mut max_x = max_x.ceil() as i32;
    let mut max_y = max_y.ceil() as i32;
    if min_x == max_x {
        max_x += 1;
    }
    if min_y == max_y {
        max_y += 1;
    }
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}
