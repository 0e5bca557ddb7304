use crate::draw::{PageNumber, Point, Stroke, erase_stroke_at};
use crate::input::events::PointerKind;
use crate::input::session::{CapturedStroke, DrawingSession, GestureStart};
use log::{debug, warn};

use super::InputState;

impl InputState {
    /// Processes a pointer press on `page` at page-local raster coordinates.
    ///
    /// # Behavior
    /// - Pen / Highlighter: starts capturing a stroke
    /// - Pixel eraser: starts erasing; nothing is removed until the pointer moves
    /// - Stroke eraser: removes the first stroke with a point closer than the hit
    ///   radius, without touching undo/redo
    ///
    /// Finger touches are ignored while `ignore_finger_touch` is set.
    pub fn on_pointer_down(&mut self, page: PageNumber, x: f64, y: f64, kind: PointerKind) {
        if !self.accepts(kind) {
            return;
        }
        if self.surfaces.get(page).is_none() {
            debug!("Pointer down on page {page}, which is not loaded");
            return;
        }

        let selection = self.selection();
        let Some(session) = session_mut(&mut self.sessions, page) else {
            return;
        };

        match session.start(selection, &self.highlighter, Point::new(x, y)) {
            GestureStart::EraseStrokeAt(at) => {
                if erase_stroke_at(
                    &mut self.store,
                    &mut self.surfaces,
                    page,
                    at,
                    self.stroke_hit_radius,
                )
                .is_some()
                {
                    self.needs_redraw = true;
                }
            }
            GestureStart::Capturing | GestureStart::Erasing => {}
            GestureStart::Ignored => {
                debug!("Pointer down on page {page} while a gesture is running");
            }
        }
    }

    /// Processes pointer motion on `page`.
    ///
    /// While capturing, the point is appended and the segment from the previous
    /// point is live-painted. While pixel erasing, the segment is cut out of the
    /// annotation layer. Otherwise nothing happens.
    pub fn on_pointer_move(&mut self, page: PageNumber, x: f64, y: f64, kind: PointerKind) {
        if !self.accepts(kind) {
            return;
        }
        let Some(session) = session_mut(&mut self.sessions, page) else {
            return;
        };
        let Some((brush, from, to)) = session.move_to(Point::new(x, y)) else {
            return;
        };

        if let Some(canvas) = self.surfaces.get_mut(page) {
            canvas.paint_segment(&brush, from, to);
            self.needs_redraw = true;
        }
    }

    /// Processes a pointer release on `page`, committing a captured stroke.
    ///
    /// Releases are accepted from any pointer kind so a gesture can always end.
    pub fn on_pointer_up(&mut self, page: PageNumber) {
        let Some(session) = session_mut(&mut self.sessions, page) else {
            return;
        };
        if let Some(captured) = session.end() {
            self.commit_capture(page, captured);
        }
    }

    /// The pointer left `page`: ends the gesture exactly like a release.
    pub fn on_pointer_leave(&mut self, page: PageNumber) {
        self.on_pointer_up(page);
    }

    fn accepts(&self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Mouse | PointerKind::Stylus | PointerKind::Unknown => true,
            PointerKind::Finger => !self.ignore_finger_touch,
        }
    }

    fn commit_capture(&mut self, page: PageNumber, captured: CapturedStroke) {
        if let [only] = captured.points.as_slice()
            && let Some(canvas) = self.surfaces.get_mut(page)
        {
            canvas.paint_dot(&captured.live_brush, *only);
        }

        let id = self.store.allocate_id();
        let point_count = captured.points.len();
        let Some(stroke) = Stroke::new(
            id,
            captured.points,
            captured.color,
            captured.width,
            captured.composite,
        ) else {
            warn!("Discarding invalid stroke on page {page} ({point_count} points)");
            return;
        };

        debug!(
            "Committed {:?} on page {} ({} points, {:?})",
            stroke.id(),
            page,
            point_count,
            stroke.composite()
        );
        self.history.record_commit(page, stroke, &mut self.store);
        self.needs_redraw = true;
    }
}

fn session_mut(sessions: &mut [DrawingSession], page: PageNumber) -> Option<&mut DrawingSession> {
    page.checked_sub(1).and_then(|i| sessions.get_mut(i))
}
