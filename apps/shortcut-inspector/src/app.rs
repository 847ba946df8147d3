//! Application state and key handling.

use crate::keymap;
use crate::panel::{Panel, PanelHandle};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shortcut_registry::{KeyDisplayConfig, KeyInput, Phase, ShortcutConfig, ShortcutRegistry};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use tracing::warn;

/// Path of the optional user binding overrides, relative to the working
/// directory.
const USER_BINDINGS: &str = "shortcuts.toml";

/// Application state.
pub struct App {
    pub panel: PanelHandle,
    pub registry: ShortcutRegistry,
    show_help: Rc<Cell<bool>>,
    quit: Rc<Cell<bool>>,
}

impl App {
    pub fn new() -> Self {
        let panel = PanelHandle::new(Panel::parapara());
        let mut registry = ShortcutRegistry::with_controls(panel.clone());
        registry.set_display(KeyDisplayConfig::symbolic());

        let show_help = Rc::new(Cell::new(false));
        let quit = Rc::new(Cell::new(false));
        keymap::install(&mut registry, &panel, &show_help, &quit);

        let overrides = Path::new(USER_BINDINGS);
        if overrides.exists() {
            match ShortcutConfig::load(overrides) {
                Ok(config) => config.apply(&mut registry),
                Err(err) => warn!("ignoring {USER_BINDINGS}: {err}"),
            }
        }

        Self {
            panel,
            registry,
            show_help,
            quit,
        }
    }

    pub fn show_help(&self) -> bool {
        self.show_help.get()
    }

    pub fn should_quit(&self) -> bool {
        self.quit.get()
    }

    /// Whether the focused control expects text.
    pub fn is_typing(&self) -> bool {
        self.registry
            .controls()
            .map(|controls| controls.in_typing_context())
            .unwrap_or(false)
    }

    /// Route one terminal key event: capture pass, bubble pass, then the
    /// focused input or the plain-key fallbacks.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }
        let input = KeyInput::from(event);
        if self.registry.dispatch(&input, Phase::Capture)
            || self.registry.dispatch(&input, Phase::Bubble)
        {
            return;
        }

        if self.is_typing() {
            let chorded = event.modifiers.intersects(
                KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER,
            );
            let mut panel = self.panel.borrow_mut();
            match event.code {
                KeyCode::Char(c) if !chorded => panel.type_char(c),
                KeyCode::Backspace => panel.backspace(),
                _ => {}
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
