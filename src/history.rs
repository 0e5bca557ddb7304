//! Per-page undo/redo for committed strokes.
//!
//! The stacks hold stroke values and assume the top of `undo` is the tail of the
//! page's stroke list. That holds while only commits, undos and redos touch a page.
//! The stroke eraser removes strokes from the store without recording history, so
//! after an erase the two can disagree: undo then pops whatever stroke is on top of
//! the page, not necessarily the one it popped from its stack. This is logged but
//! not corrected.

use crate::draw::{PageNumber, PageRedraw, Stroke, StrokeStore};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Undo and redo stacks of one page.
#[derive(Debug, Default)]
struct PageHistory {
    undo: Vec<Stroke>,
    redo: Vec<Stroke>,
}

/// Undo/redo stacks for every page, kept in step with the [`StrokeStore`].
#[derive(Debug, Default)]
pub struct UndoRedoController {
    pages: BTreeMap<PageNumber, PageHistory>,
}

impl UndoRedoController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a new stroke: appends it to the page, pushes it on the undo stack
    /// and discards the redo stack.
    pub fn record_commit(&mut self, page: PageNumber, stroke: Stroke, store: &mut StrokeStore) {
        if !store.append(page, stroke.clone()) {
            return;
        }
        let history = self.pages.entry(page).or_default();
        history.undo.push(stroke);
        if !history.redo.is_empty() {
            debug!(
                "New stroke on page {} discards {} redo entries",
                page,
                history.redo.len()
            );
            history.redo.clear();
        }
    }

    /// Takes back the most recent commit on `page` and repaints it.
    ///
    /// Returns `false` without doing anything when there is nothing to undo.
    pub fn undo(
        &mut self,
        page: PageNumber,
        store: &mut StrokeStore,
        canvas: &mut dyn PageRedraw,
    ) -> bool {
        let Some(history) = self.pages.get_mut(&page) else {
            return false;
        };
        let Some(stroke) = history.undo.pop() else {
            return false;
        };

        let popped = store.pop_last(page);
        if popped.as_ref().map(Stroke::id) != Some(stroke.id()) {
            warn!(
                "Undo on page {} popped {:?} from history but {:?} from the page; \
                 history diverged after a stroke erase",
                page,
                stroke.id(),
                popped.as_ref().map(Stroke::id)
            );
        }
        history.redo.push(stroke);

        canvas.redraw_page(page, store.strokes(page));
        true
    }

    /// Re-applies the most recently undone stroke on `page` and repaints it.
    ///
    /// Returns `false` without doing anything when there is nothing to redo. A redo
    /// entry the page refuses (its id is already there) is dropped and also
    /// returns `false`.
    pub fn redo(
        &mut self,
        page: PageNumber,
        store: &mut StrokeStore,
        canvas: &mut dyn PageRedraw,
    ) -> bool {
        let Some(history) = self.pages.get_mut(&page) else {
            return false;
        };
        let Some(stroke) = history.redo.pop() else {
            return false;
        };

        if !store.push_back(page, stroke.clone()) {
            warn!(
                "Redo on page {} could not restore {:?}; dropping it from history",
                page,
                stroke.id()
            );
            return false;
        }
        history.undo.push(stroke);

        canvas.redraw_page(page, store.strokes(page));
        true
    }

    pub fn can_undo(&self, page: PageNumber) -> bool {
        !self.undo_stack(page).is_empty()
    }

    pub fn can_redo(&self, page: PageNumber) -> bool {
        !self.redo_stack(page).is_empty()
    }

    /// Undo stack of a page, bottom first.
    pub fn undo_stack(&self, page: PageNumber) -> &[Stroke] {
        self.pages
            .get(&page)
            .map(|h| h.undo.as_slice())
            .unwrap_or(&[])
    }

    /// Redo stack of a page, bottom first.
    pub fn redo_stack(&self, page: PageNumber) -> &[Stroke] {
        self.pages
            .get(&page)
            .map(|h| h.redo.as_slice())
            .unwrap_or(&[])
    }

    /// Forgets every page's history (new document loaded).
    pub fn reset_all(&mut self) {
        self.pages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CompositeMode, Point, RED, StrokeId, YELLOW, erase_stroke_at};

    #[derive(Default)]
    struct CountingCanvas {
        redraws: Vec<(PageNumber, Vec<StrokeId>)>,
    }

    impl PageRedraw for CountingCanvas {
        fn redraw_page(&mut self, page: PageNumber, strokes: &[Stroke]) {
            self.redraws
                .push((page, strokes.iter().map(Stroke::id).collect()));
        }
    }

    fn stroke(store: &mut StrokeStore, x: f64) -> Stroke {
        let id = store.allocate_id();
        Stroke::new(
            id,
            vec![Point::new(x, x), Point::new(x + 5.0, x + 5.0)],
            RED,
            2.0,
            CompositeMode::Normal,
        )
        .unwrap()
    }

    fn ids(strokes: &[Stroke]) -> Vec<StrokeId> {
        strokes.iter().map(Stroke::id).collect()
    }

    #[test]
    fn commits_keep_store_and_undo_in_step() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();

        for i in 0..5 {
            let s = stroke(&mut store, i as f64 * 10.0);
            history.record_commit(1, s, &mut store);
        }

        assert_eq!(store.len(1), 5);
        assert_eq!(history.undo_stack(1).len(), 5);
        assert!(history.redo_stack(1).is_empty());
        assert_eq!(ids(store.strokes(1)), ids(history.undo_stack(1)));
    }

    #[test]
    fn commit_after_undo_clears_redo() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        let a = stroke(&mut store, 0.0);
        let b = stroke(&mut store, 10.0);
        history.record_commit(1, a, &mut store);
        history.record_commit(1, b, &mut store);
        assert!(history.undo(1, &mut store, &mut canvas));
        assert!(history.can_redo(1));

        let c = stroke(&mut store, 20.0);
        history.record_commit(1, c, &mut store);
        assert!(!history.can_redo(1));
        assert!(!history.redo(1, &mut store, &mut canvas));
    }

    #[test]
    fn undo_then_redo_restores_sequence() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        for i in 0..3 {
            let s = stroke(&mut store, i as f64);
            history.record_commit(2, s, &mut store);
        }
        let before = ids(store.strokes(2));

        assert!(history.undo(2, &mut store, &mut canvas));
        assert!(history.undo(2, &mut store, &mut canvas));
        assert_eq!(store.len(2), 1);
        assert!(history.redo(2, &mut store, &mut canvas));
        assert!(history.redo(2, &mut store, &mut canvas));

        assert_eq!(ids(store.strokes(2)), before);
        assert_eq!(ids(history.undo_stack(2)), before);
        assert_eq!(canvas.redraws.len(), 4);
        assert_eq!(canvas.redraws.last().unwrap().1, before);
    }

    #[test]
    fn empty_history_is_a_silent_no_op() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        assert!(!history.undo(1, &mut store, &mut canvas));
        assert!(!history.redo(1, &mut store, &mut canvas));
        assert!(canvas.redraws.is_empty());
    }

    #[test]
    fn pages_have_independent_histories() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        let a = stroke(&mut store, 0.0);
        history.record_commit(1, a.clone(), &mut store);

        assert!(!history.undo(2, &mut store, &mut canvas));
        assert_eq!(ids(store.strokes(1)), vec![a.id()]);
        assert_eq!(ids(history.undo_stack(1)), vec![a.id()]);
        assert!(history.redo_stack(1).is_empty());
    }

    #[test]
    fn erase_leaves_history_untouched_and_undo_pops_page_tail() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        let a = stroke(&mut store, 0.0);
        let b = Stroke::new(
            store.allocate_id(),
            vec![Point::new(100.0, 100.0)],
            YELLOW,
            20.0,
            CompositeMode::Highlight,
        )
        .unwrap();
        history.record_commit(1, a.clone(), &mut store);
        history.record_commit(1, b.clone(), &mut store);

        // Erase B directly: history still lists A and B
        erase_stroke_at(&mut store, &mut canvas, 1, Point::new(100.0, 100.0), 10.0).unwrap();
        assert_eq!(ids(history.undo_stack(1)), vec![a.id(), b.id()]);
        assert_eq!(ids(store.strokes(1)), vec![a.id()]);

        // Undo pops B from history but A from the page (the documented divergence)
        assert!(history.undo(1, &mut store, &mut canvas));
        assert!(store.is_empty(1));
        assert_eq!(ids(history.redo_stack(1)), vec![b.id()]);
    }

    #[test]
    fn refused_redo_keeps_undo_in_step_with_store() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let mut canvas = CountingCanvas::default();

        let a = stroke(&mut store, 0.0);
        history.record_commit(1, a.clone(), &mut store);
        assert!(history.undo(1, &mut store, &mut canvas));

        // Same stroke put back outside history: redo must not duplicate it
        assert!(store.append(1, a.clone()));
        let redraws = canvas.redraws.len();
        assert!(!history.redo(1, &mut store, &mut canvas));

        assert_eq!(ids(store.strokes(1)), vec![a.id()]);
        assert!(history.undo_stack(1).is_empty());
        assert!(history.redo_stack(1).is_empty());
        assert_eq!(canvas.redraws.len(), redraws);
    }

    #[test]
    fn reset_all_forgets_every_page() {
        let mut store = StrokeStore::new();
        let mut history = UndoRedoController::new();
        let a = stroke(&mut store, 0.0);
        let b = stroke(&mut store, 1.0);
        history.record_commit(1, a, &mut store);
        history.record_commit(3, b, &mut store);

        history.reset_all();
        assert!(!history.can_undo(1));
        assert!(!history.can_undo(3));
    }
}
