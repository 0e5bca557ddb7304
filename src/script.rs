//! Replayable input scripts.
//!
//! A script is a TOML file listing host events in order. The CLI uses it to
//! annotate a document without a display:
//!
//! ```toml
//! [[events]]
//! type = "set-mode"
//! mode = "highlighter"
//!
//! [[events]]
//! type = "stroke"
//! page = 1
//! points = [[40.0, 120.0], [220.0, 120.0]]
//!
//! [[events]]
//! type = "key"
//! combo = "Ctrl+Z"
//! ```

use crate::config::{ColorSpec, KeyBinding};
use crate::draw::PageNumber;
use crate::input::{DrawMode, InputState, Key, PointerKind};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScriptEvent {
    SetMode {
        mode: DrawMode,
    },
    SetColor {
        color: ColorSpec,
    },
    SetWidth {
        width: f64,
    },
    ActivePage {
        page: PageNumber,
    },
    PointerDown {
        page: PageNumber,
        x: f64,
        y: f64,
        #[serde(default)]
        pointer: PointerKind,
    },
    PointerMove {
        page: PageNumber,
        x: f64,
        y: f64,
        #[serde(default)]
        pointer: PointerKind,
    },
    PointerUp {
        page: PageNumber,
    },
    PointerLeave {
        page: PageNumber,
    },
    /// Press at the first point, move through the rest, release.
    Stroke {
        page: PageNumber,
        points: Vec<[f64; 2]>,
        #[serde(default)]
        pointer: PointerKind,
    },
    /// A key combination such as "Ctrl+Z" or "H".
    Key {
        combo: String,
    },
    Undo,
    Redo,
}

/// Counters reported after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    pub events: usize,
    pub consumed_keys: usize,
    pub ignored: usize,
}

/// A parsed event script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml(&source)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }

    /// Parses a script and checks every key combination.
    pub fn from_toml(source: &str) -> Result<Self> {
        let script: Script = toml::from_str(source)?;
        for (index, event) in script.events.iter().enumerate() {
            if let ScriptEvent::Key { combo } = event {
                KeyBinding::parse(combo)
                    .map_err(|err| anyhow::anyhow!("event {}: {}", index + 1, err))?;
            }
        }
        Ok(script)
    }

    /// Feeds every event to `state` in order.
    pub fn run(&self, state: &mut InputState) -> Result<ScriptSummary> {
        let mut summary = ScriptSummary::default();

        for event in &self.events {
            debug!("Script event: {:?}", event);
            summary.events += 1;
            match event {
                ScriptEvent::SetMode { mode } => state.set_mode(*mode),
                ScriptEvent::SetColor { color } => match color.parse() {
                    Some(color) => state.set_color(color),
                    None => {
                        warn!("Ignoring unknown color {:?}", color);
                        summary.ignored += 1;
                    }
                },
                ScriptEvent::SetWidth { width } => state.set_width(*width),
                ScriptEvent::ActivePage { page } => {
                    if !state.set_active_page(*page) {
                        summary.ignored += 1;
                    }
                }
                ScriptEvent::PointerDown {
                    page,
                    x,
                    y,
                    pointer,
                } => state.on_pointer_down(*page, *x, *y, *pointer),
                ScriptEvent::PointerMove {
                    page,
                    x,
                    y,
                    pointer,
                } => state.on_pointer_move(*page, *x, *y, *pointer),
                ScriptEvent::PointerUp { page } => state.on_pointer_up(*page),
                ScriptEvent::PointerLeave { page } => state.on_pointer_leave(*page),
                ScriptEvent::Stroke {
                    page,
                    points,
                    pointer,
                } => {
                    let Some(([x, y], rest)) = points.split_first() else {
                        warn!("Ignoring stroke without points on page {page}");
                        summary.ignored += 1;
                        continue;
                    };
                    state.on_pointer_down(*page, *x, *y, *pointer);
                    for [x, y] in rest {
                        state.on_pointer_move(*page, *x, *y, *pointer);
                    }
                    state.on_pointer_up(*page);
                }
                ScriptEvent::Key { combo } => {
                    if press_combo(state, combo)? {
                        summary.consumed_keys += 1;
                    } else {
                        summary.ignored += 1;
                    }
                }
                ScriptEvent::Undo => {
                    state.undo();
                }
                ScriptEvent::Redo => {
                    state.redo();
                }
            }
        }

        info!(
            "Script finished: {} events, {} shortcuts, {} ignored",
            summary.events, summary.consumed_keys, summary.ignored
        );
        Ok(summary)
    }
}

/// Presses the modifiers, the key, then releases the modifiers.
fn press_combo(state: &mut InputState, combo: &str) -> Result<bool> {
    let binding = KeyBinding::parse(combo).map_err(|err| anyhow::anyhow!(err))?;

    let modifiers = [
        (binding.ctrl, Key::Ctrl),
        (binding.shift, Key::Shift),
        (binding.alt, Key::Alt),
    ];
    for (held, key) in modifiers {
        if held {
            state.on_key_press(key);
        }
    }
    let consumed = state.on_key_press(Key::from_name(&binding.key));
    for (held, key) in modifiers {
        if held {
            state.on_key_release(key);
        }
    }
    Ok(consumed)
}
