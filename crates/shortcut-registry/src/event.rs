//! Key input events fed to the registry.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// One key press as seen by the dispatcher.
///
/// This is the registry's own view of a keyboard event: the key and
/// modifiers plus the three flags dispatch cares about. Convert live
/// terminal events with `KeyInput::from`; release events are the caller's
/// job to filter out before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
    /// The key is being held down and this is an auto-repeat.
    pub repeat: bool,
    /// An input method is composing text; the press must not match anything.
    pub composing: bool,
    /// The key originated from the numeric keypad.
    pub keypad: bool,
}

impl KeyInput {
    /// A plain key press.
    pub fn press(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers,
            repeat: false,
            composing: false,
            keypad: false,
        }
    }

    /// Mark this press as an auto-repeat.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Mark this press as part of an IME composition.
    pub fn while_composing(mut self) -> Self {
        self.composing = true;
        self
    }

    /// Mark this press as coming from the numeric keypad.
    pub fn on_keypad(mut self) -> Self {
        self.keypad = true;
        self
    }
}

impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
            repeat: event.kind == KeyEventKind::Repeat,
            // Terminals deliver composed text as plain characters, so a
            // converted event is never mid-composition.
            composing: false,
            keypad: event.state.contains(KeyEventState::KEYPAD),
        }
    }
}
