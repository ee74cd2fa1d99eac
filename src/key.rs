//! Key bindings for terminal hosts.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// A set of keys that trigger one action, with help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the binding.
    pub keys: Vec<KeyCode>,
    /// Short key label, e.g. `"←/h"`.
    pub help: String,
    /// What the binding does.
    pub description: String,
}

impl Binding {
    /// Creates a binding for `keys` with no help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Sets the key label.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the key press triggers this binding.
    pub fn matches(&self, key: &KeyMsg) -> bool {
        self.keys.contains(&key.key)
    }
}

/// Previous/next bindings of a carousel.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Show the previous slide. Default: Left, `h`.
    pub prev: Binding,
    /// Show the next slide. Default: Right, `l`.
    pub next: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            prev: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h")
                .with_description("previous slide"),
            next: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l")
                .with_description("next slide"),
        }
    }
}
