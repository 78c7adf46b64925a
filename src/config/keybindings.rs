//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::config::ConfigError;
use crate::tui::event::Action;

/// Key strings bound to each action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub exit: Vec<String>,
    pub activate: Vec<String>,
    pub dismiss: Vec<String>,
    pub move_down: Vec<String>,
    pub move_up: Vec<String>,
    pub page_down: Vec<String>,
    pub page_up: Vec<String>,
    pub goto_top: Vec<String>,
    pub goto_bottom: Vec<String>,
    pub refresh: Vec<String>,
    pub open_link: Vec<String>,
}

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            exit: keys(&["Ctrl+c"]),
            activate: keys(&["Enter", "o"]),
            dismiss: keys(&["Backspace", "q"]),
            move_down: keys(&["Down", "j"]),
            move_up: keys(&["Up", "k"]),
            page_down: keys(&["PageDown", "Ctrl+f", "Space"]),
            page_up: keys(&["PageUp", "Ctrl+b"]),
            goto_top: keys(&["Home", "g"]),
            goto_bottom: keys(&["End", "G"]),
            refresh: keys(&["r"]),
            open_link: keys(&["b"]),
        }
    }
}

impl KeybindingConfig {
    /// Parse every binding into a [`Keymap`].
    ///
    /// Earlier actions win when two actions share a key, so `exit` always
    /// takes precedence.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let groups = [
            (&self.exit, Action::Exit),
            (&self.activate, Action::Activate),
            (&self.dismiss, Action::Dismiss),
            (&self.move_down, Action::MoveDown),
            (&self.move_up, Action::MoveUp),
            (&self.page_down, Action::PageDown),
            (&self.page_up, Action::PageUp),
            (&self.goto_top, Action::GotoTop),
            (&self.goto_bottom, Action::GotoBottom),
            (&self.refresh, Action::RefreshAll),
            (&self.open_link, Action::OpenLink),
        ];

        let mut bindings = Vec::new();
        for (strings, action) in groups {
            for s in strings {
                let binding = parse_key_string(s).map_err(ConfigError::Keybinding)?;
                bindings.push((binding, action));
            }
        }

        Ok(Keymap { bindings })
    }
}

/// Parsed bindings, looked up on every key press.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, Action)>,
}

impl Keymap {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    ///
    /// Shift is ignored so that `G` matches however the terminal reports it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // A lone "+" is a key, not a separator.
    let parts: Vec<&str> = if s == "+" { vec![s] } else { s.split('+').collect() };

    let mut modifiers = KeyModifiers::NONE;
    let (key_part, modifier_parts) = match parts.split_last() {
        Some((key, mods)) => (*key, mods),
        None => return Err("Empty key binding".to_string()),
    };

    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        f if f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => Ok(KeyCode::F(n)),
            _ => Err(format!("Unknown key: {}", s)),
        },
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("j").unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("Backspace").unwrap().code, KeyCode::Backspace);
        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+f").unwrap();
        assert_eq!(binding.code, KeyCode::Char('f'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_key_string("Hyper+x").is_err());
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("nope").is_err());
        assert!(parse_key_string("").is_err());
    }

    #[test]
    fn test_keybinding_matches() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(binding.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_default_keymap() {
        let keymap = KeybindingConfig::default().keymap().unwrap();
        let none = KeyModifiers::NONE;

        assert_eq!(keymap.get_action(&key(KeyCode::Enter, none)), Action::Activate);
        assert_eq!(keymap.get_action(&key(KeyCode::Char('o'), none)), Action::Activate);
        assert_eq!(keymap.get_action(&key(KeyCode::Backspace, none)), Action::Dismiss);
        assert_eq!(keymap.get_action(&key(KeyCode::Char('q'), none)), Action::Dismiss);
        assert_eq!(keymap.get_action(&key(KeyCode::Char('j'), none)), Action::MoveDown);
        assert_eq!(keymap.get_action(&key(KeyCode::Up, none)), Action::MoveUp);
        assert_eq!(keymap.get_action(&key(KeyCode::Char(' '), none)), Action::PageDown);
        assert_eq!(
            keymap.get_action(&key(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Action::PageDown
        );
        assert_eq!(
            keymap.get_action(&key(KeyCode::Char('b'), KeyModifiers::CONTROL)),
            Action::PageUp
        );
        assert_eq!(keymap.get_action(&key(KeyCode::Char('b'), none)), Action::OpenLink);
        assert_eq!(keymap.get_action(&key(KeyCode::Home, none)), Action::GotoTop);
        assert_eq!(
            keymap.get_action(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::GotoBottom
        );
        assert_eq!(keymap.get_action(&key(KeyCode::Char('g'), none)), Action::GotoTop);
        assert_eq!(keymap.get_action(&key(KeyCode::Char('r'), none)), Action::RefreshAll);
        assert_eq!(
            keymap.get_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Exit
        );
        assert_eq!(keymap.get_action(&key(KeyCode::Char('z'), none)), Action::None);
    }

    #[test]
    fn test_invalid_binding_is_config_error() {
        let config = KeybindingConfig {
            refresh: vec!["Meta+r".into()],
            ..KeybindingConfig::default()
        };
        assert!(matches!(config.keymap(), Err(ConfigError::Keybinding(_))));
    }
}
