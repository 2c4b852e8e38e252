use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// High-level actions the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    ToggleGuides,
    /// Terminal size changed; re-read it and redraw
    Resize,
    Quit,

    // No-op
    None,
}

impl Action {
    /// Parse action from string (used when loading from config)
    pub fn from_str(s: &str) -> Option<Action> {
        match s {
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "move_left" => Some(Action::MoveLeft),
            "move_right" => Some(Action::MoveRight),
            "page_up" => Some(Action::PageUp),
            "page_down" => Some(Action::PageDown),
            "go_to_top" => Some(Action::GoToTop),
            "toggle_guides" => Some(Action::ToggleGuides),
            "quit" => Some(Action::Quit),
            "none" => Some(Action::None),
            _ => None,
        }
    }
}

/// Resolves key events to actions based on configuration
pub struct KeybindingResolver {
    /// Map from (key, modifiers) to action
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,

    /// Default bindings (used as fallback)
    default_bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl KeybindingResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &Config) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
            default_bindings: Self::create_default_bindings(),
        };

        for binding in &config.keybindings {
            let Some(key_code) = Self::parse_key(&binding.key) else {
                tracing::warn!("Ignoring keybinding with unknown key '{}'", binding.key);
                continue;
            };
            let modifiers = Self::parse_modifiers(&binding.modifiers);
            match Action::from_str(&binding.action) {
                Some(action) => {
                    resolver.bindings.insert((key_code, modifiers), action);
                }
                None => {
                    tracing::warn!("Ignoring keybinding with unknown action '{}'", binding.action)
                }
            }
        }

        resolver
    }

    /// Resolve a key event to an action
    pub fn resolve(&self, event: &KeyEvent) -> Action {
        // Shifted letters arrive as uppercase chars; SHIFT itself carries no meaning then
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        let key = (event.code, modifiers);

        if let Some(action) = self.bindings.get(&key) {
            tracing::debug!("{:?} -> {:?} (custom)", key, action);
            return *action;
        }

        if let Some(action) = self.default_bindings.get(&key) {
            tracing::debug!("{:?} -> {:?}", key, action);
            return *action;
        }

        tracing::trace!("{:?} is not bound", key);
        Action::None
    }

    /// Parse a key string to KeyCode
    pub(crate) fn parse_key(key: &str) -> Option<KeyCode> {
        match key.to_lowercase().as_str() {
            "enter" => Some(KeyCode::Enter),
            "tab" => Some(KeyCode::Tab),
            "esc" | "escape" => Some(KeyCode::Esc),
            "space" => Some(KeyCode::Char(' ')),

            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),

            s if s.chars().count() == 1 => key.chars().next().map(KeyCode::Char),
            _ => None,
        }
    }

    pub(crate) fn parse_modifier(name: &str) -> Option<KeyModifiers> {
        match name.to_lowercase().as_str() {
            "ctrl" | "control" => Some(KeyModifiers::CONTROL),
            "shift" => Some(KeyModifiers::SHIFT),
            "alt" => Some(KeyModifiers::ALT),
            _ => None,
        }
    }

    /// Parse modifiers from strings, skipping unknown names
    fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
        modifiers
            .iter()
            .filter_map(|m| Self::parse_modifier(m))
            .fold(KeyModifiers::empty(), |acc, m| acc | m)
    }

    /// Create default keybindings
    fn create_default_bindings() -> HashMap<(KeyCode, KeyModifiers), Action> {
        let mut bindings = HashMap::new();
        let none = KeyModifiers::empty();

        // Line scrolling
        bindings.insert((KeyCode::Up, none), Action::MoveUp);
        bindings.insert((KeyCode::Down, none), Action::MoveDown);
        bindings.insert((KeyCode::Left, none), Action::MoveLeft);
        bindings.insert((KeyCode::Right, none), Action::MoveRight);
        bindings.insert((KeyCode::Char('k'), none), Action::MoveUp);
        bindings.insert((KeyCode::Char('j'), none), Action::MoveDown);
        bindings.insert((KeyCode::Char('h'), none), Action::MoveLeft);
        bindings.insert((KeyCode::Char('l'), none), Action::MoveRight);

        // Paging
        bindings.insert((KeyCode::PageUp, none), Action::PageUp);
        bindings.insert((KeyCode::PageDown, none), Action::PageDown);
        bindings.insert((KeyCode::Char(' '), none), Action::PageDown);

        bindings.insert((KeyCode::Home, none), Action::GoToTop);
        bindings.insert((KeyCode::Char('g'), none), Action::GoToTop);

        bindings.insert((KeyCode::Char('t'), none), Action::ToggleGuides);

        bindings.insert((KeyCode::Char('q'), none), Action::Quit);
        bindings.insert((KeyCode::Esc, none), Action::Quit);
        // Raw mode delivers Ctrl+C as a key instead of SIGINT
        bindings.insert((KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);

        bindings
    }
}
