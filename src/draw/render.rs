//! Cairo-based rendering of annotation layers.
//!
//! Two independent rule sets live here:
//! - **replay** ([`render_page`], [`render_stroke`]): the authoritative repaint of a
//!   page's annotation layer from its stroke list;
//! - **live paint** ([`paint_live_segment`], [`paint_live_dot`]): incremental feedback
//!   painted while a gesture is in progress.
//!
//! The highlighter deliberately looks different under the two rule sets (opaque yellow
//! at reduced opacity while drawing, recorded translucent yellow on replay).

use super::color::Color;
use super::store::PageNumber;
use super::stroke::{CompositeMode, Point, Stroke};
use cairo::{Context, ImageSurface, LineCap, LineJoin, Operator};

/// Something that can repaint a page's annotation layer from its strokes.
///
/// Implemented by [`PageSurfaces`](super::PageSurfaces); the undo/redo controller and
/// the stroke eraser call it after mutating the stroke store.
pub trait PageRedraw {
    fn redraw_page(&mut self, page: PageNumber, strokes: &[Stroke]);
}

/// Brush used for live feedback during a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiveBrush {
    /// Pen: opaque ink painted over the layer
    Pen { color: Color, width: f64 },
    /// Highlighter: opaque color multiplied at `opacity`
    Highlighter {
        color: Color,
        opacity: f64,
        width: f64,
    },
    /// Pixel eraser: punches holes into the layer
    Eraser { width: f64 },
}

impl LiveBrush {
    pub fn width(&self) -> f64 {
        match self {
            LiveBrush::Pen { width, .. }
            | LiveBrush::Highlighter { width, .. }
            | LiveBrush::Eraser { width } => *width,
        }
    }
}

/// Clears the layer and replays every stroke in paint order.
///
/// Anything painted directly onto the layer (live feedback, pixel erasure) is
/// discarded: the result depends only on `strokes`.
pub fn render_page(layer: &ImageSurface, strokes: &[Stroke]) -> Result<(), cairo::Error> {
    let ctx = Context::new(layer)?;
    clear_layer(&ctx);
    render_strokes(&ctx, strokes);
    layer.flush();
    Ok(())
}

/// Makes every pixel of the target fully transparent.
pub fn clear_layer(ctx: &Context) {
    let _ = ctx.save();
    ctx.set_operator(Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Renders all strokes in order (first stroke = bottom layer).
pub fn render_strokes(ctx: &Context, strokes: &[Stroke]) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Replays a single stroke with its recorded parameters.
pub fn render_stroke(ctx: &Context, stroke: &Stroke) {
    let operator = match stroke.composite() {
        CompositeMode::Normal => Operator::Over,
        CompositeMode::Highlight => Operator::Multiply,
    };

    let _ = ctx.save();
    ctx.set_operator(operator);
    stroke.color().apply(ctx);
    ctx.set_line_width(stroke.width());
    set_round_pen(ctx);
    trace_polyline(ctx, stroke.points());
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Paints one captured segment for immediate feedback.
pub fn paint_live_segment(ctx: &Context, brush: &LiveBrush, from: Point, to: Point) {
    let _ = ctx.save();
    set_round_pen(ctx);
    ctx.set_line_width(brush.width());
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);

    match brush {
        LiveBrush::Pen { color, .. } => {
            ctx.set_operator(Operator::Over);
            color.apply(ctx);
            let _ = ctx.stroke();
        }
        LiveBrush::Highlighter { color, opacity, .. } => {
            ctx.set_operator(Operator::Multiply);
            color.with_alpha(color.a * opacity.clamp(0.0, 1.0)).apply(ctx);
            let _ = ctx.stroke();
        }
        LiveBrush::Eraser { .. } => {
            ctx.set_operator(Operator::DestOut);
            ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
            let _ = ctx.stroke();
        }
    }

    let _ = ctx.restore();
}

/// Paints a tap (gesture without drag) for immediate feedback.
pub fn paint_live_dot(ctx: &Context, brush: &LiveBrush, at: Point) {
    paint_live_segment(ctx, brush, at, at);
}

/// Merges a page's base raster and its annotation layer into a new image.
pub fn flatten_page(base: &ImageSurface, layer: &ImageSurface) -> Result<ImageSurface, cairo::Error> {
    let merged = ImageSurface::create(cairo::Format::ARgb32, base.width(), base.height())?;
    {
        let ctx = Context::new(&merged)?;
        ctx.set_source_surface(base, 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_source_surface(layer, 0.0, 0.0)?;
        ctx.paint()?;
    }
    merged.flush();
    Ok(merged)
}

fn set_round_pen(ctx: &Context) {
    ctx.set_line_cap(LineCap::Round);
    ctx.set_line_join(LineJoin::Round);
}

/// Builds the path through `points`. A single point becomes a zero-length segment,
/// which Cairo paints as a round dot.
fn trace_polyline(ctx: &Context, points: &[Point]) {
    let Some(first) = points.first() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    if points.len() == 1 {
        ctx.line_to(first.x, first.y);
        return;
    }
    for p in &points[1..] {
        ctx.line_to(p.x, p.y);
    }
}
