use cairo::{Format, ImageSurface};
use pagescribe::draw::{
    BLUE, CompositeMode, LiveBrush, PageCanvas, Point, RED, Stroke, StrokeId, YELLOW, render_page,
};

fn stroke(id: u64, points: &[(f64, f64)], composite: CompositeMode) -> Stroke {
    let (color, width) = match composite {
        CompositeMode::Normal => (BLUE, 3.0),
        CompositeMode::Highlight => (YELLOW.with_alpha(0.3), 20.0),
    };
    Stroke::new(
        StrokeId(id),
        points.iter().copied().map(Point::from).collect(),
        color,
        width,
        composite,
    )
    .unwrap()
}

fn three_strokes() -> Vec<Stroke> {
    vec![
        stroke(1, &[(10.0, 10.0), (100.0, 100.0)], CompositeMode::Normal),
        stroke(2, &[(10.0, 60.0), (150.0, 60.0)], CompositeMode::Highlight),
        stroke(3, &[(40.0, 140.0)], CompositeMode::Normal),
    ]
}

fn pixels(surface: &ImageSurface) -> Vec<u8> {
    let mut out = Vec::new();
    surface.with_data(|data| out = data.to_vec()).unwrap();
    out
}

fn blank_page() -> ImageSurface {
    ImageSurface::create(Format::ARgb32, 160, 160).unwrap()
}

#[test]
fn replay_is_deterministic() {
    let strokes = three_strokes();
    let first = blank_page();
    let second = blank_page();

    render_page(&first, &strokes).unwrap();
    render_page(&second, &strokes).unwrap();

    let first = pixels(&first);
    assert!(first.iter().any(|byte| *byte != 0));
    assert_eq!(first, pixels(&second));
}

#[test]
fn replay_discards_live_paint_and_pixel_erasure() {
    let strokes = three_strokes();

    let reference = blank_page();
    render_page(&reference, &strokes).unwrap();

    let mut canvas = PageCanvas::new(blank_page()).unwrap();
    canvas.replay(&strokes);
    canvas.paint_segment(
        &LiveBrush::Eraser { width: 30.0 },
        Point::new(0.0, 60.0),
        Point::new(160.0, 60.0),
    );
    canvas.paint_segment(
        &LiveBrush::Pen {
            color: RED,
            width: 5.0,
        },
        Point::new(0.0, 0.0),
        Point::new(160.0, 160.0),
    );
    assert_ne!(pixels(canvas.layer()), pixels(&reference));

    canvas.replay(&strokes);
    assert_eq!(pixels(canvas.layer()), pixels(&reference));
}

#[test]
fn paint_order_is_storage_order() {
    let forward = three_strokes();
    let mut reversed = three_strokes();
    reversed.reverse();

    let a = blank_page();
    let b = blank_page();
    render_page(&a, &forward).unwrap();
    render_page(&b, &reversed).unwrap();

    // Highlight multiplied over blue ink darkens it; blue painted over the highlight does not
    assert_ne!(pixels(&a), pixels(&b));
}

#[test]
fn flatten_keeps_base_raster_untouched() {
    let base = blank_page();
    {
        let ctx = cairo::Context::new(&base).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }
    let before = pixels(&base);

    let mut canvas = PageCanvas::new(base).unwrap();
    canvas.replay(&three_strokes());
    let merged = canvas.flatten().unwrap();

    assert_eq!(pixels(canvas.base()), before);
    assert_ne!(pixels(&merged), before);
}
