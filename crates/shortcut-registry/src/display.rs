//! Human-readable chord rendering for help listings.

use crate::chord::Chord;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Format for displaying chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDisplayFormat {
    /// Text labels joined with `+`: Ctrl+Shift+G, Up, Enter
    #[default]
    Text,
    /// Concatenated unicode symbols: ⌃⇧G, ↑, ⏎
    Symbolic,
}

/// Configuration for rendering chords to users.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KeyDisplayConfig {
    /// Display format.
    pub format: KeyDisplayFormat,
}

impl KeyDisplayConfig {
    /// Text display config.
    pub fn text() -> Self {
        Self {
            format: KeyDisplayFormat::Text,
        }
    }

    /// Symbolic display config.
    pub fn symbolic() -> Self {
        Self {
            format: KeyDisplayFormat::Symbolic,
        }
    }

    /// Render a chord for display.
    pub fn format_chord(&self, chord: &Chord) -> String {
        let mut parts = Vec::new();
        let modifiers = chord.modifiers();
        if modifiers.contains(KeyModifiers::CONTROL) {
            parts.push(self.modifier_label("ctrl").to_string());
        }
        if modifiers.contains(KeyModifiers::ALT) {
            parts.push(self.modifier_label("alt").to_string());
        }
        if modifiers.contains(KeyModifiers::SHIFT) {
            parts.push(self.modifier_label("shift").to_string());
        }
        if modifiers.contains(KeyModifiers::META) {
            parts.push(self.modifier_label("meta").to_string());
        }
        parts.push(self.key_label(chord));

        match self.format {
            KeyDisplayFormat::Text => parts.join("+"),
            KeyDisplayFormat::Symbolic => parts.join(""),
        }
    }

    fn modifier_label(&self, name: &str) -> &'static str {
        match (self.format, name) {
            (KeyDisplayFormat::Symbolic, "ctrl") => "\u{2303}",
            (KeyDisplayFormat::Symbolic, "alt") => "\u{2325}",
            (KeyDisplayFormat::Symbolic, "shift") => "\u{21e7}",
            (KeyDisplayFormat::Symbolic, "meta") => "\u{2318}",
            (_, "ctrl") => "Ctrl",
            (_, "alt") => "Alt",
            (_, "shift") => "Shift",
            (_, "meta") => "Meta",
            _ => "",
        }
    }

    fn key_label(&self, chord: &Chord) -> String {
        if self.format == KeyDisplayFormat::Text {
            return chord.key_name();
        }
        let symbol = match chord.code() {
            KeyCode::Up => "\u{2191}",
            KeyCode::Down => "\u{2193}",
            KeyCode::Left => "\u{2190}",
            KeyCode::Right => "\u{2192}",
            KeyCode::Enter => "\u{23ce}",
            KeyCode::Esc => "\u{238b}",
            KeyCode::Tab => "\u{21e5}",
            KeyCode::Backspace => "\u{232b}",
            KeyCode::Delete => "\u{2326}",
            KeyCode::Char(' ') => "\u{2423}",
            _ => return chord.key_name(),
        };
        if chord.is_keypad() {
            format!("Numpad{}", symbol)
        } else {
            symbol.to_string()
        }
    }
}
