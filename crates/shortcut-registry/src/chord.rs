//! Canonical key chord type.

use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;

/// Modifiers that take part in chord identity.
///
/// Platform SUPER is folded into META so that "Meta" in a chord string
/// matches whichever flag the terminal reports for the command/windows key.
pub(crate) fn canonical_modifiers(modifiers: KeyModifiers) -> KeyModifiers {
    let mut out = modifiers
        & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::META);
    if modifiers.contains(KeyModifiers::SUPER) {
        out |= KeyModifiers::META;
    }
    out
}

/// A normalized key chord: modifier set plus base key.
///
/// Two chords that were written with modifiers in a different order compare
/// equal, because the modifier set is stored as flags and rendered in a
/// fixed order (Control, Alt, Shift, Meta). Chords are layout-dependent:
/// they name the character or key the keyboard layout produces, not a
/// physical scancode position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    key: KeyCode,
    modifiers: KeyModifiers,
    keypad: bool,
}

impl Chord {
    /// Create a chord, normalizing the key and modifier representation.
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::with_keypad(key, modifiers, false)
    }

    /// Create a chord for a numeric-keypad key.
    ///
    /// Keypad chords are distinct from their main-keyboard equivalents
    /// unless the registry is configured to absorb the keypad.
    pub fn with_keypad(key: KeyCode, modifiers: KeyModifiers, keypad: bool) -> Self {
        let mut modifiers = canonical_modifiers(modifiers);
        let key = match key {
            // Terminals report Shift+Tab as its own key.
            KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Tab
            }
            KeyCode::Char(c) => KeyCode::Char(c.to_uppercase().next().unwrap_or(c)),
            other => other,
        };
        Self {
            key,
            modifiers,
            keypad,
        }
    }

    /// Chord with no modifiers.
    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Ctrl+character chord.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Alt+character chord.
    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    /// Shift+key chord.
    pub fn shift(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::SHIFT)
    }

    /// The base key.
    pub fn code(&self) -> KeyCode {
        self.key
    }

    /// The modifier set.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Whether this chord names a numeric-keypad key.
    pub fn is_keypad(&self) -> bool {
        self.keypad
    }

    /// Canonical name of the base key, without modifiers.
    pub fn key_name(&self) -> String {
        let name = match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        if self.keypad {
            format!("Numpad{}", name)
        } else {
            name
        }
    }
}

impl fmt::Display for Chord {
    /// Canonical chord string: modifiers in fixed order, then the base key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Control+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        if self.modifiers.contains(KeyModifiers::META) {
            write!(f, "Meta+")?;
        }
        write!(f, "{}", self.key_name())
    }
}
