//! Configuration management for mrss.
//!
//! Everything lives under `mrss/` in the platform config directory
//! (`~/.config/mrss` on Linux):
//! - `urls`: the subscription list, one feed URL per line (required)
//! - `config.toml`: colors and keybindings (optional, created with
//!   commented defaults on first run)

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::{KeybindingConfig, Keymap};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the subscription list inside the config directory.
pub const URLS_FILE: &str = "urls";

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Config {
    /// Load `config.toml` from `dir`.
    ///
    /// If the file doesn't exist, a commented default is written and the
    /// defaults are returned. Missing fields use default values.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(SETTINGS_FILE);

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// `mrss` inside the platform config directory.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("mrss"))
    }

    /// Path of the subscription list inside `dir`.
    pub fn urls_path(dir: &Path) -> PathBuf {
        dir.join(URLS_FILE)
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# mrss configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[colors]
# Text color; also the highlight bar color
foreground = "Black"
# Page color; also the highlighted text color
background = "White"

[keybindings]
exit = ["Ctrl+c"]
activate = ["Enter", "o"]
dismiss = ["Backspace", "q"]
move_down = ["Down", "j"]
move_up = ["Up", "k"]
page_down = ["PageDown", "Ctrl+f", "Space"]
page_up = ["PageUp", "Ctrl+b"]
goto_top = ["Home", "g"]
goto_bottom = ["End", "G"]
refresh = ["r"]
open_link = ["b"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Line {line} of the url file is longer than {max} bytes")]
    LineTooLong { line: usize, max: usize },

    #[error("Line {line} of the url file is not valid UTF-8")]
    Encoding { line: usize },

    #[error("Invalid keybinding: {0}")]
    Keybinding(String),
}
