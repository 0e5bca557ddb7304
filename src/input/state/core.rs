//! Input state: the user's selection, per-page gesture sessions and the loaded document.

use crate::config::{Action, Config, KeyBinding};
use crate::draw::{Color, PageNumber, PageSurfaces, StrokeStore};
use crate::history::UndoRedoController;
use crate::input::{
    mode::DrawMode,
    modifiers::Modifiers,
    session::{DrawingSession, HighlighterSettings, Selection},
};
use crate::util::{self, Rect};
use std::collections::HashMap;

/// Smallest selectable pen width in pixels.
pub const MIN_WIDTH: f64 = 1.0;
/// Largest selectable pen width in pixels.
pub const MAX_WIDTH: f64 = 20.0;

/// Main input state for one annotated document.
///
/// Owns the committed strokes, the undo/redo history, the page surfaces and a
/// gesture session per page. Hosts feed it pointer and keyboard events and read
/// back the annotation layers (see [`InputState::surfaces`]) for display.
pub struct InputState {
    /// Committed strokes of every page
    pub(super) store: StrokeStore,
    /// Per-page undo/redo stacks
    pub(super) history: UndoRedoController,
    /// Base rasters and annotation layers of installed pages
    pub(super) surfaces: PageSurfaces,
    /// One gesture state machine per page of the current document
    pub(super) sessions: Vec<DrawingSession>,
    /// Pages announced by the current document (installed or not)
    pub(super) page_count: usize,
    /// Page that keyboard undo/redo act on
    pub(super) active_page: Option<PageNumber>,
    /// Bumped on every document load; stale loaders compare against it
    pub(super) document_generation: u64,
    /// Selected draw mode
    pub(super) mode: DrawMode,
    /// Selected pen color
    pub(super) color: Color,
    /// Selected pen width (also the pixel eraser width)
    pub(super) width: f64,
    /// Highlighter appearance (from config)
    pub highlighter: HighlighterSettings,
    /// Stroke eraser hit distance in pixels (from config)
    pub stroke_hit_radius: f64,
    /// Whether finger touches are left to the host for scrolling
    pub ignore_finger_touch: bool,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether some annotation layer changed since the host last presented
    pub needs_redraw: bool,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates an input state with no document loaded.
    ///
    /// # Arguments
    /// * `mode` - Initially selected draw mode
    /// * `color` - Initial pen color
    /// * `width` - Initial pen width, clamped to 1.0-20.0
    /// * `highlighter` - Highlighter appearance
    /// * `stroke_hit_radius` - Stroke eraser hit distance
    /// * `ignore_finger_touch` - Whether finger touches are ignored
    /// * `action_map` - Keybinding action map
    pub fn with_defaults(
        mode: DrawMode,
        color: Color,
        width: f64,
        highlighter: HighlighterSettings,
        stroke_hit_radius: f64,
        ignore_finger_touch: bool,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            store: StrokeStore::new(),
            history: UndoRedoController::new(),
            surfaces: PageSurfaces::new(),
            sessions: Vec::new(),
            page_count: 0,
            active_page: None,
            document_generation: 0,
            mode,
            color,
            width: clamp_width(width),
            highlighter,
            stroke_hit_radius,
            ignore_finger_touch,
            modifiers: Modifiers::new(),
            needs_redraw: false,
            action_map,
        }
    }

    /// Creates an input state from a validated config.
    ///
    /// # Errors
    /// Fails when a keybinding cannot be parsed or is bound twice.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|err| anyhow::anyhow!("Invalid keybindings: {err}"))?;

        Ok(Self::with_defaults(
            config.drawing.default_mode,
            config.drawing.default_color.to_color(),
            config.drawing.default_width,
            config.highlighter_settings(),
            config.eraser.stroke_hit_radius,
            config.input.ignore_finger_touch,
            action_map,
        ))
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Selects the mode for the next gesture. A running gesture keeps its mode.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if self.mode != mode {
            log::debug!("Mode: {}", mode.label());
        }
        self.mode = mode;
    }

    /// Selects the pen color for the next gesture.
    pub fn set_color(&mut self, color: Color) {
        log::debug!("Pen color: {}", util::color_to_name(&color));
        self.color = color;
    }

    /// Selects the pen width for the next gesture, clamped to 1.0-20.0.
    ///
    /// Non-finite values are ignored.
    pub fn set_width(&mut self, width: f64) {
        if !width.is_finite() {
            log::warn!("Ignoring non-finite pen width {width}");
            return;
        }
        self.width = clamp_width(width);
    }

    /// Adjusts the pen width by `delta`, clamped to 1.0-20.0.
    pub fn adjust_width(&mut self, delta: f64) {
        self.set_width(self.width + delta);
        log::debug!("Pen width adjusted to {:.0}px", self.width);
    }

    pub(super) fn selection(&self) -> Selection {
        Selection {
            mode: self.mode,
            color: self.color,
            width: self.width,
        }
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Page targeted by keyboard undo/redo, `None` before a document is loaded.
    pub fn active_page(&self) -> Option<PageNumber> {
        self.active_page
    }

    /// Makes `page` the target of keyboard undo/redo.
    ///
    /// Pages outside the current document are rejected with a warning and the
    /// active page is left unchanged. Returns whether the page was accepted.
    pub fn set_active_page(&mut self, page: PageNumber) -> bool {
        if page == 0 || page > self.page_count {
            log::warn!(
                "Ignoring active page {} (document has {} pages)",
                page,
                self.page_count
            );
            return false;
        }
        self.active_page = Some(page);
        true
    }

    /// Pages in the current document, including ones still loading.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Pages installed so far.
    pub fn pages_loaded(&self) -> usize {
        self.surfaces.len()
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn history(&self) -> &UndoRedoController {
        &self.history
    }

    pub fn surfaces(&self) -> &PageSurfaces {
        &self.surfaces
    }

    /// Drains the damage of one page's annotation layer since the last call.
    pub fn take_dirty_regions(&mut self, page: PageNumber) -> Vec<Rect> {
        self.surfaces
            .get_mut(page)
            .map(|canvas| canvas.take_dirty_regions())
            .unwrap_or_default()
    }

    /// Whether a gesture is in progress on `page`.
    pub fn is_gesture_active(&self, page: PageNumber) -> bool {
        self.session(page).is_some_and(|s| !s.is_idle())
    }

    pub(super) fn session(&self, page: PageNumber) -> Option<&DrawingSession> {
        page.checked_sub(1).and_then(|i| self.sessions.get(i))
    }

    /// Drops every running gesture without committing anything.
    pub fn cancel_gestures(&mut self) {
        for session in &mut self.sessions {
            session.cancel();
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Undoes the last commit on the active page. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.active_page {
            Some(page) => self.undo_page(page),
            None => false,
        }
    }

    /// Redoes the last undone commit on the active page. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.active_page {
            Some(page) => self.redo_page(page),
            None => false,
        }
    }

    /// Undoes the last commit on `page`.
    pub fn undo_page(&mut self, page: PageNumber) -> bool {
        let changed = self
            .history
            .undo(page, &mut self.store, &mut self.surfaces);
        self.needs_redraw |= changed;
        changed
    }

    /// Redoes the last undone commit on `page`.
    pub fn redo_page(&mut self, page: PageNumber) -> bool {
        let changed = self
            .history
            .redo(page, &mut self.store, &mut self.surfaces);
        self.needs_redraw |= changed;
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.active_page
            .is_some_and(|page| self.history.can_undo(page))
    }

    pub fn can_redo(&self) -> bool {
        self.active_page
            .is_some_and(|page| self.history.can_redo(page))
    }

    // ------------------------------------------------------------------
    // Keybindings
    // ------------------------------------------------------------------

    /// Looks up the action bound to a key name under the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }
}

fn clamp_width(width: f64) -> f64 {
    width.clamp(MIN_WIDTH, MAX_WIDTH)
}
