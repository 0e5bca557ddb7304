//! Per-page gesture state machine.
//!
//! A session is `Idle` until a pointer press starts a gesture on its page. What
//! the gesture does is fixed at that moment from the selected mode, color and
//! width; changing the selection mid-gesture only affects the next one.

use crate::draw::{Color, CompositeMode, LiveBrush, Point};
use crate::input::mode::DrawMode;

/// Highlighter parameters for both rendering paths.
///
/// While drawing, the highlighter paints `live_color` with multiply compositing
/// at `live_opacity`. The committed stroke records `replay_color` (usually the
/// same hue with low alpha) so that replay looks different from live feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlighterSettings {
    pub width: f64,
    pub live_color: Color,
    pub live_opacity: f64,
    pub replay_color: Color,
}

impl Default for HighlighterSettings {
    fn default() -> Self {
        Self {
            width: 20.0,
            live_color: crate::draw::YELLOW,
            live_opacity: 0.6,
            replay_color: crate::draw::YELLOW.with_alpha(0.3),
        }
    }
}

/// Selection sampled at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub mode: DrawMode,
    pub color: Color,
    pub width: f64,
}

/// A finished capture, ready to become a [`Stroke`](crate::draw::Stroke).
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedStroke {
    pub points: Vec<Point>,
    pub color: Color,
    pub width: f64,
    pub composite: CompositeMode,
    /// Brush used for live feedback, needed to paint a dot for single-point taps.
    pub live_brush: LiveBrush,
}

/// What the caller has to do after [`DrawingSession::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStart {
    /// A stroke capture began; nothing is painted until the pointer moves.
    Capturing,
    /// Pixel erasing began.
    Erasing,
    /// Stroke-erase mode: remove the stroke nearest to this point. The session stays idle.
    EraseStrokeAt(Point),
    /// A gesture was already running on this page.
    Ignored,
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    Capturing {
        brush: LiveBrush,
        color: Color,
        width: f64,
        composite: CompositeMode,
        points: Vec<Point>,
    },
    Erasing {
        brush: LiveBrush,
        last: Point,
    },
}

/// Gesture state of one page.
#[derive(Debug, Default)]
pub struct DrawingSession {
    state: SessionState,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, SessionState::Capturing { .. })
    }

    /// Points captured so far (empty unless capturing).
    pub fn points(&self) -> &[Point] {
        match &self.state {
            SessionState::Capturing { points, .. } => points.as_slice(),
            _ => &[],
        }
    }

    /// Handles a pointer press at `at` with the current selection.
    pub fn start(
        &mut self,
        selection: Selection,
        highlighter: &HighlighterSettings,
        at: Point,
    ) -> GestureStart {
        if !self.is_idle() {
            return GestureStart::Ignored;
        }

        match selection.mode {
            DrawMode::Pen => {
                self.state = SessionState::Capturing {
                    brush: LiveBrush::Pen {
                        color: selection.color,
                        width: selection.width,
                    },
                    color: selection.color,
                    width: selection.width,
                    composite: CompositeMode::Normal,
                    points: vec![at],
                };
                GestureStart::Capturing
            }
            DrawMode::Highlighter => {
                self.state = SessionState::Capturing {
                    brush: LiveBrush::Highlighter {
                        color: highlighter.live_color,
                        opacity: highlighter.live_opacity,
                        width: highlighter.width,
                    },
                    color: highlighter.replay_color,
                    width: highlighter.width,
                    composite: CompositeMode::Highlight,
                    points: vec![at],
                };
                GestureStart::Capturing
            }
            DrawMode::PixelEraser => {
                self.state = SessionState::Erasing {
                    brush: LiveBrush::Eraser {
                        width: selection.width,
                    },
                    last: at,
                };
                GestureStart::Erasing
            }
            DrawMode::StrokeEraser => GestureStart::EraseStrokeAt(at),
        }
    }

    /// Handles pointer motion. Returns the segment to live-paint, if any.
    pub fn move_to(&mut self, at: Point) -> Option<(LiveBrush, Point, Point)> {
        match &mut self.state {
            SessionState::Idle => None,
            SessionState::Capturing { brush, points, .. } => {
                let from = points.last().copied().unwrap_or(at);
                points.push(at);
                Some((*brush, from, at))
            }
            SessionState::Erasing { brush, last } => {
                let from = std::mem::replace(last, at);
                Some((*brush, from, at))
            }
        }
    }

    /// Ends the gesture. Returns the capture to commit, if one was running.
    pub fn end(&mut self) -> Option<CapturedStroke> {
        match std::mem::take(&mut self.state) {
            SessionState::Capturing {
                brush,
                color,
                width,
                composite,
                points,
            } => Some(CapturedStroke {
                points,
                color,
                width,
                composite,
                live_brush: brush,
            }),
            SessionState::Idle | SessionState::Erasing { .. } => None,
        }
    }

    /// Drops any running gesture without committing it.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, RED};

    fn select(mode: DrawMode, color: Color, width: f64) -> Selection {
        Selection { mode, color, width }
    }

    #[test]
    fn pen_gesture_captures_every_point() {
        let mut session = DrawingSession::new();
        let start = session.start(
            select(DrawMode::Pen, RED, 2.0),
            &HighlighterSettings::default(),
            Point::new(10.0, 10.0),
        );
        assert_eq!(start, GestureStart::Capturing);

        let (brush, from, to) = session.move_to(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(brush, LiveBrush::Pen { color: RED, width: 2.0 });
        assert_eq!(from, Point::new(10.0, 10.0));
        assert_eq!(to, Point::new(20.0, 20.0));
        session.move_to(Point::new(30.0, 30.0));

        let captured = session.end().unwrap();
        assert_eq!(captured.points.len(), 3);
        assert_eq!(captured.color, RED);
        assert_eq!(captured.width, 2.0);
        assert_eq!(captured.composite, CompositeMode::Normal);
        assert!(session.is_idle());
    }

    #[test]
    fn highlighter_records_replay_style_but_paints_live_style() {
        let settings = HighlighterSettings::default();
        let mut session = DrawingSession::new();
        session.start(
            select(DrawMode::Highlighter, BLUE, 3.0),
            &settings,
            Point::new(0.0, 0.0),
        );

        let (brush, _, _) = session.move_to(Point::new(5.0, 0.0)).unwrap();
        assert_eq!(
            brush,
            LiveBrush::Highlighter {
                color: settings.live_color,
                opacity: 0.6,
                width: 20.0
            }
        );

        let captured = session.end().unwrap();
        assert_eq!(captured.color, settings.replay_color);
        assert_eq!(captured.width, 20.0);
        assert_eq!(captured.composite, CompositeMode::Highlight);
    }

    #[test]
    fn pixel_eraser_paints_but_never_commits() {
        let mut session = DrawingSession::new();
        assert_eq!(
            session.start(
                select(DrawMode::PixelEraser, RED, 8.0),
                &HighlighterSettings::default(),
                Point::new(1.0, 1.0),
            ),
            GestureStart::Erasing
        );
        let (brush, from, _) = session.move_to(Point::new(4.0, 1.0)).unwrap();
        assert_eq!(brush, LiveBrush::Eraser { width: 8.0 });
        assert_eq!(from, Point::new(1.0, 1.0));
        let (_, from, _) = session.move_to(Point::new(9.0, 1.0)).unwrap();
        assert_eq!(from, Point::new(4.0, 1.0));

        assert!(session.end().is_none());
        assert!(session.is_idle());
    }

    #[test]
    fn stroke_eraser_stays_idle() {
        let mut session = DrawingSession::new();
        let start = session.start(
            select(DrawMode::StrokeEraser, RED, 2.0),
            &HighlighterSettings::default(),
            Point::new(7.0, 8.0),
        );
        assert_eq!(start, GestureStart::EraseStrokeAt(Point::new(7.0, 8.0)));
        assert!(session.is_idle());
        assert!(session.move_to(Point::new(9.0, 9.0)).is_none());
        assert!(session.end().is_none());
    }

    #[test]
    fn second_press_during_gesture_is_ignored() {
        let mut session = DrawingSession::new();
        let settings = HighlighterSettings::default();
        session.start(select(DrawMode::Pen, RED, 2.0), &settings, Point::new(0.0, 0.0));
        assert_eq!(
            session.start(select(DrawMode::Pen, BLUE, 9.0), &settings, Point::new(5.0, 5.0)),
            GestureStart::Ignored
        );
        assert_eq!(session.points(), &[Point::new(0.0, 0.0)]);
    }

    #[test]
    fn motion_without_press_does_nothing() {
        let mut session = DrawingSession::new();
        assert!(session.move_to(Point::new(1.0, 1.0)).is_none());
        assert!(session.end().is_none());
    }

    #[test]
    fn cancel_discards_capture() {
        let mut session = DrawingSession::new();
        session.start(
            select(DrawMode::Pen, RED, 2.0),
            &HighlighterSettings::default(),
            Point::new(0.0, 0.0),
        );
        session.cancel();
        assert!(session.end().is_none());
    }
}
