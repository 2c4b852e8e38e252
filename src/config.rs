use crate::input::keybindings::{Action, KeybindingResolver};
use crossterm::event::{KeyCode, KeyModifiers};
use crate::view::theme::Palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// Largest accepted indent width
pub const MAX_INDENT_WIDTH: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Layout settings (indentation, guides)
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Colors for each highlighting class
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Custom keybindings, checked before the defaults
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
}

/// Viewer layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Columns per nesting level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Start with indent guides visible
    #[serde(default = "default_false")]
    pub show_indent_guides: bool,

    /// Glyph drawn once per nesting level when guides are visible.
    /// Must be exactly one column wide.
    #[serde(default = "default_guide_glyph")]
    pub guide_glyph: String,
}

fn default_indent_width() -> usize {
    4
}

fn default_false() -> bool {
    false
}

fn default_guide_glyph() -> String {
    "│".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            show_indent_guides: false,
            guide_glyph: default_guide_glyph(),
        }
    }
}

/// Color names per highlighting class.
///
/// Anything ratatui can parse is accepted: named colors ("cyan", "light-blue"),
/// "#rrggbb" and 256-color indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub plain: String,
    pub tag_markup: String,
    pub tag_name: String,
    pub attr_name: String,
    pub attr_value: String,
    pub text: String,
    pub indent_guide: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            plain: "white".to_string(),
            tag_markup: "cyan".to_string(),
            tag_name: "cyan".to_string(),
            attr_name: "yellow".to_string(),
            attr_value: "magenta".to_string(),
            text: "red".to_string(),
            indent_guide: "blue".to_string(),
        }
    }
}

/// A single key → action binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybinding {
    /// Key name ("q", "down", "pagedown", "home", ...)
    pub key: String,

    /// Modifiers ("ctrl", "alt", "shift")
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Action name ("move_down", "toggle_guides", "quit", ...)
    pub action: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            palette: PaletteConfig::default(),
            keybindings: vec![],
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the user config file if it exists,
    /// else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            tracing::info!("Loading config from {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::user_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading user config from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                tracing::debug!("No user config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/cursexml/config.json`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cursexml").join("config.json"))
    }

    /// Effective configuration as pretty-printed JSON, in the format
    /// `load_from_file` reads
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewer.indent_width == 0 || self.viewer.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "indent_width must be between 1 and {MAX_INDENT_WIDTH}"
            )));
        }

        if self.viewer.guide_glyph.width() != 1 {
            return Err(ConfigError::ValidationError(
                "guide_glyph must be exactly one column wide".to_string(),
            ));
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            let Some(code) = KeybindingResolver::parse_key(&binding.key) else {
                return Err(ConfigError::ValidationError(format!(
                    "unknown key '{}'",
                    binding.key
                )));
            };
            for name in &binding.modifiers {
                let Some(modifier) = KeybindingResolver::parse_modifier(name) else {
                    return Err(ConfigError::ValidationError(format!(
                        "unknown modifier '{name}' for key '{}'",
                        binding.key
                    )));
                };
                // Character keys arrive with shift already applied to the character
                if modifier == KeyModifiers::SHIFT && matches!(code, KeyCode::Char(_)) {
                    return Err(ConfigError::ValidationError(format!(
                        "shift has no effect on character key '{}'; bind the shifted character",
                        binding.key
                    )));
                }
            }
            if Action::from_str(&binding.action).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "unknown keybinding action '{}'",
                    binding.action
                )));
            }
        }

        Palette::from_config(&self.palette)?;

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
