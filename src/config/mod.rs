//! Configuration file support for pagescribe.
//!
//! Settings are loaded from `~/.config/pagescribe/config.toml` (or a file given on
//! the command line). They cover drawing defaults, highlighter and eraser
//! behavior, page rasterization, export destination, input filtering and
//! keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    DocumentConfig, DrawingConfig, EraserConfig, ExportConfig, HighlighterConfig, InputConfig,
};

use crate::input::HighlighterSettings;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have defaults, so an empty file (or none at all) is valid.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ff0000"
/// default_width = 2.0
/// default_mode = "pen"
///
/// [highlighter]
/// width = 20.0
/// alpha = 0.3
///
/// [document]
/// render_scale = 1.5
///
/// [export]
/// directory = "~/Documents"
/// filename_template = "annotated_%Y-%m-%d"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pen defaults (color, width, mode)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Highlighter appearance
    #[serde(default)]
    pub highlighter: HighlighterConfig,

    /// Eraser behavior
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Page rasterization
    #[serde(default)]
    pub document: DocumentConfig,

    /// Export destination
    #[serde(default)]
    pub export: ExportConfig,

    /// Pointer filtering
    #[serde(default)]
    pub input: InputConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Out-of-range values are clamped to the nearest valid value and invalid
    /// colors are replaced by their defaults, each with a warning.
    ///
    /// Validated ranges:
    /// - `drawing.default_width`: 1.0 - 20.0
    /// - `highlighter.width`: 1.0 - 100.0
    /// - `highlighter.live_opacity`, `highlighter.alpha`: 0.0 - 1.0
    /// - `eraser.stroke_hit_radius`: 1.0 - 100.0
    /// - `document.render_scale`: 0.25 - 8.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field(
            &mut self.drawing.default_width,
            1.0,
            20.0,
            2.0,
            "drawing.default_width",
        );
        clamp_field(
            &mut self.highlighter.width,
            1.0,
            100.0,
            20.0,
            "highlighter.width",
        );
        clamp_field(
            &mut self.highlighter.live_opacity,
            0.0,
            1.0,
            0.6,
            "highlighter.live_opacity",
        );
        clamp_field(
            &mut self.highlighter.alpha,
            0.0,
            1.0,
            0.3,
            "highlighter.alpha",
        );
        clamp_field(
            &mut self.eraser.stroke_hit_radius,
            1.0,
            100.0,
            10.0,
            "eraser.stroke_hit_radius",
        );
        clamp_field(
            &mut self.document.render_scale,
            0.25,
            8.0,
            1.5,
            "document.render_scale",
        );

        let defaults = Config::default();
        if self.drawing.default_color.parse().is_none() {
            warn!(
                "Invalid drawing.default_color {:?}, falling back to {:?}",
                self.drawing.default_color, defaults.drawing.default_color
            );
            self.drawing.default_color = defaults.drawing.default_color;
        }
        if self.highlighter.live_color.parse().is_none() {
            warn!(
                "Invalid highlighter.live_color {:?}, falling back to yellow",
                self.highlighter.live_color
            );
            self.highlighter.live_color = defaults.highlighter.live_color;
        }
        if self.highlighter.color.parse().is_none() {
            warn!(
                "Invalid highlighter.color {:?}, falling back to yellow",
                self.highlighter.color
            );
            self.highlighter.color = defaults.highlighter.color;
        }

        if self.export.filename_template.trim().is_empty() {
            warn!(
                "Empty export.filename_template, falling back to '{}'",
                defaults.export.filename_template
            );
            self.export.filename_template = defaults.export.filename_template;
        }
    }

    /// Highlighter parameters for the input layer.
    pub fn highlighter_settings(&self) -> HighlighterSettings {
        HighlighterSettings {
            width: self.highlighter.width,
            live_color: self.highlighter.live_color.to_color(),
            live_opacity: self.highlighter.live_opacity,
            replay_color: self
                .highlighter
                .color
                .to_color()
                .with_alpha(self.highlighter.alpha),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/pagescribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pagescribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document without validating it.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Saves the configuration to the default path, creating the directory if needed.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(config_path)
    }

    /// Writes the documented example config (`config.example.toml`) to `path`.
    ///
    /// # Errors
    /// Fails if a file already exists at `path` or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editors and external tools.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_field(value: &mut f64, min: f64, max: f64, fallback: f64, name: &str) {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, falling back to {fallback}");
        *value = fallback;
    } else if !(min..=max).contains(&*value) {
        warn!("Invalid {name} {value:.2}, clamping to {min}-{max} range");
        *value = (*value).clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, YELLOW};
    use crate::input::DrawMode;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.drawing.default_color.to_color(), RED);
        assert_eq!(config.drawing.default_width, 2.0);
        assert_eq!(config.drawing.default_mode, DrawMode::Pen);
        assert_eq!(config.highlighter.width, 20.0);
        assert_eq!(config.eraser.stroke_hit_radius, 10.0);
        assert_eq!(config.document.render_scale, 1.5);
        assert!(config.input.ignore_finger_touch);
    }

    #[test]
    fn highlighter_settings_combine_color_and_alpha() {
        let settings = Config::default().highlighter_settings();
        assert_eq!(settings.live_color, YELLOW);
        assert_eq!(settings.replay_color, YELLOW.with_alpha(0.3));
        assert_eq!(settings.live_opacity, 0.6);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            default_width = 55.0
            default_color = "chartreuse"
            default_mode = "stroke-eraser"

            [highlighter]
            alpha = 2.0

            [document]
            render_scale = 0.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 20.0);
        assert_eq!(config.drawing.default_color.to_color(), RED);
        assert_eq!(config.drawing.default_mode, DrawMode::StrokeEraser);
        assert_eq!(config.highlighter.alpha, 1.0);
        assert_eq!(config.document.render_scale, 0.25);
    }

    #[test]
    fn keybindings_merge_with_defaults() {
        let config = Config::from_toml(
            r#"
            [keybindings]
            redo = ["Ctrl+Shift+Z"]
            "#,
        )
        .unwrap();
        assert_eq!(config.keybindings.redo, vec!["Ctrl+Shift+Z".to_string()]);
        assert_eq!(config.keybindings.undo, vec!["Ctrl+Z".to_string()]);
    }

    #[test]
    fn example_config_parses() {
        let config = Config::from_toml(include_str!("../../config.example.toml")).unwrap();
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["drawing", "highlighter", "eraser", "document", "export", "input"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
