//! Customizable keybindings for the lightbox.
//!
//! Keys are named the way the DOM's `KeyboardEvent.key` names them, so the
//! browser glue can translate events with [`Key::from_dom`] and config files
//! can spell keys as plain strings.

use serde::{Deserialize, Serialize};

/// Keyboard keys the lightbox can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Home,
    End,
    /// Printable character, stored lowercase
    Char(char),
}

impl Key {
    /// Translate a `KeyboardEvent.key` value. Unknown keys give `None`.
    pub fn from_dom(key: &str) -> Option<Key> {
        let key = match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Home" => Key::Home,
            "End" => Key::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => {
                        Key::Char(c.to_lowercase().next().unwrap_or(c))
                    }
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// DOM name of this key.
    pub fn name(&self) -> String {
        match self {
            Key::Escape => "Escape".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::ArrowUp => "ArrowUp".to_string(),
            Key::ArrowDown => "ArrowDown".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Space => "Space".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::from_dom(&value).ok_or_else(|| format!("unknown key name '{}'", value))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

/// What a bound key does while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Close,
    Previous,
    Next,
}

impl GalleryAction {
    /// Get all actions in display order.
    pub fn all() -> &'static [GalleryAction] {
        &[
            GalleryAction::Close,
            GalleryAction::Previous,
            GalleryAction::Next,
        ]
    }

    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            GalleryAction::Close => "Close gallery",
            GalleryAction::Previous => "Previous image",
            GalleryAction::Next => "Next image",
        }
    }
}

/// Keybinding configuration for the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Hotkey that closes the lightbox
    pub close: Key,
    /// Hotkey for the previous image
    pub previous: Key,
    /// Hotkey for the next image
    pub next: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            close: Key::Escape,
            previous: Key::ArrowLeft,
            next: Key::ArrowRight,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<GalleryAction> {
        if key == self.close {
            Some(GalleryAction::Close)
        } else if key == self.previous {
            Some(GalleryAction::Previous)
        } else if key == self.next {
            Some(GalleryAction::Next)
        } else {
            None
        }
    }

    /// Get the hotkey for a specific action.
    pub fn key_for_action(&self, action: GalleryAction) -> Key {
        match action {
            GalleryAction::Close => self.close,
            GalleryAction::Previous => self.previous,
            GalleryAction::Next => self.next,
        }
    }

    /// Check if a key is already used by another action.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key, exclude: Option<GalleryAction>) -> Option<String> {
        GalleryAction::all()
            .iter()
            .filter(|action| Some(**action) != exclude)
            .find(|action| self.key_for_action(**action) == key)
            .map(|action| action.name().to_string())
    }

    /// First key bound to two actions, with both action names.
    ///
    /// Only one of them could ever fire, since [`Self::action_for_key`]
    /// returns the first match.
    pub fn find_conflict(&self) -> Option<(Key, String, String)> {
        GalleryAction::all().iter().find_map(|action| {
            let key = self.key_for_action(*action);
            self.key_conflict(key, Some(*action))
                .map(|other| (key, action.name().to_string(), other))
        })
    }
}
