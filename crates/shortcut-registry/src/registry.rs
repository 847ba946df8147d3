//! Binding registry and two-phase dispatch.

use crate::chord::Chord;
use crate::controls::{parse_target, ControlHost, Interaction};
use crate::display::KeyDisplayConfig;
use crate::event::KeyInput;
use crate::help::HelpEntry;
use crate::parser::parse_chord;

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Which keyboard-dispatch pass a binding fires in.
///
/// The host is expected to offer every key press to the capture pass first
/// and to the bubble pass second, mirroring the two passes of widget event
/// propagation. A binding is only ever eligible in its own phase, so it
/// fires at most once per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before the focused widget sees the key.
    Capture,
    /// After the focused widget declined the key.
    #[default]
    Bubble,
}

/// Options for registering a shortcut.
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Label shown in the help listing.
    pub description: String,
    /// Dispatch pass the binding listens on.
    pub phase: Phase,
    /// Fire even when a typing surface has focus.
    pub allow_while_typing: bool,
}

impl BindOptions {
    /// Options with a help description.
    pub fn describe(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Listen on the capture pass.
    pub fn capture(mut self) -> Self {
        self.phase = Phase::Capture;
        self
    }

    /// Fire even while the user is typing.
    pub fn while_typing(mut self) -> Self {
        self.allow_while_typing = true;
        self
    }
}

enum BoundAction {
    Callback(Box<dyn FnMut()>),
    Control { id: String, interaction: Interaction },
}

impl fmt::Debug for BoundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback"),
            Self::Control { id, interaction } => f
                .debug_struct("Control")
                .field("id", id)
                .field("interaction", interaction)
                .finish(),
        }
    }
}

#[derive(Debug)]
struct Binding {
    action: BoundAction,
    description: String,
    allow_while_typing: bool,
}

/// Registry of keyboard shortcuts.
///
/// Owns the chord-to-binding table and dispatches key input against it.
/// Registration never fails loudly: malformed chords and collisions are
/// logged at warn level and skipped, so a bad declaration cannot take the
/// application down. Replacing a binding on purpose goes through
/// [`overwrite`](Self::overwrite); `bind` always keeps the first
/// registration.
pub struct ShortcutRegistry {
    bindings: IndexMap<Chord, Binding>,
    capture_keys: HashSet<Chord>,
    controls: Option<Box<dyn ControlHost>>,
    display: KeyDisplayConfig,
    absorb_numpad: bool,
    typing: bool,
}

impl ShortcutRegistry {
    /// Create an empty registry with no control host.
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
            capture_keys: HashSet::new(),
            controls: None,
            display: KeyDisplayConfig::default(),
            absorb_numpad: true,
            typing: false,
        }
    }

    /// Create a registry that resolves control targets against `host`.
    pub fn with_controls(host: impl ControlHost + 'static) -> Self {
        let mut registry = Self::new();
        registry.controls = Some(Box::new(host));
        registry
    }

    /// The control host, if any.
    pub fn controls(&self) -> Option<&dyn ControlHost> {
        self.controls.as_deref()
    }

    /// Mutable access to the control host, if any.
    pub fn controls_mut(&mut self) -> Option<&mut (dyn ControlHost + '_)> {
        self.controls.as_deref_mut()
    }

    /// Collapse keypad keys onto their main-keyboard equivalents when
    /// matching events (on by default). Keypad-specific bindings such as
    /// `"NumpadEnter"` only match while this is off.
    pub fn set_absorb_numpad(&mut self, absorb: bool) {
        self.absorb_numpad = absorb;
    }

    /// How chords are rendered in [`help_entries`](Self::help_entries).
    pub fn set_display(&mut self, display: KeyDisplayConfig) {
        self.display = display;
    }

    /// Report whether focus is on a typing surface.
    ///
    /// Only consulted when the registry has no control host; a host reports
    /// this itself through [`ControlHost::in_typing_context`].
    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    /// Whether a chord currently has a binding.
    pub fn is_bound(&self, chord: &str) -> bool {
        parse_chord(chord)
            .map(|chord| self.bindings.contains_key(&chord))
            .unwrap_or(false)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Register a callback shortcut.
    ///
    /// Logs and does nothing if the chord does not parse or is already
    /// bound.
    pub fn bind<F>(&mut self, chord: &str, action: F, options: BindOptions)
    where
        F: FnMut() + 'static,
    {
        self.install(chord, BoundAction::Callback(Box::new(action)), options);
    }

    /// Register a shortcut that synthesizes an interaction on a named
    /// control.
    ///
    /// `target` is `"id"` or `"id:interaction"`; a bare id uses the
    /// interaction the host infers for that control. Logs and does nothing
    /// if there is no control host, the control is unknown, or no
    /// interaction can be resolved.
    pub fn bind_control(&mut self, chord: &str, target: &str, options: BindOptions) {
        let (id, explicit) = parse_target(target);
        let Some(host) = self.controls.as_ref() else {
            warn!("cannot bind {chord:?} to {target:?}: registry has no control host");
            return;
        };
        if !host.contains(id) {
            warn!("cannot bind {chord:?}: unknown control {id:?}");
            return;
        }
        let Some(interaction) = explicit.or_else(|| host.default_interaction(id)) else {
            warn!("cannot bind {chord:?}: no interaction for control {id:?}");
            return;
        };
        self.install(
            chord,
            BoundAction::Control {
                id: id.to_string(),
                interaction,
            },
            options,
        );
    }

    /// Replace whatever is bound to `chord` with a new callback.
    ///
    /// Unlike [`bind`](Self::bind) this is explicit about clobbering; it is
    /// fine if nothing was bound before.
    pub fn overwrite<F>(&mut self, chord: &str, action: F, options: BindOptions)
    where
        F: FnMut() + 'static,
    {
        self.unbind(chord);
        self.bind(chord, action, options);
    }

    /// Remove the binding for a chord, if present.
    pub fn unbind(&mut self, chord: &str) {
        let parsed = match parse_chord(chord) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("cannot unbind {chord:?}: {err}");
                return;
            }
        };
        self.bindings.shift_remove(&parsed);
        self.capture_keys.remove(&parsed);
    }

    fn install(&mut self, chord: &str, action: BoundAction, options: BindOptions) {
        let parsed = match parse_chord(chord) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("ignoring shortcut {chord:?}: {err}");
                return;
            }
        };
        if self.bindings.contains_key(&parsed) {
            warn!("shortcut {parsed} already bound, keeping the existing binding");
            return;
        }
        if options.phase == Phase::Capture {
            self.capture_keys.insert(parsed);
        }
        self.bindings.insert(
            parsed,
            Binding {
                action,
                description: options.description,
                allow_while_typing: options.allow_while_typing,
            },
        );
    }

    /// The chord a key press resolves to, or None while an input method is
    /// composing (composition never matches a binding).
    pub fn chord_of(&self, input: &KeyInput) -> Option<Chord> {
        if input.composing {
            return None;
        }
        let keypad = input.keypad && !self.absorb_numpad;
        Some(Chord::with_keypad(input.code, input.modifiers, keypad))
    }

    /// Offer a key press to one dispatch pass.
    ///
    /// Returns true when a binding fired; the caller should then suppress
    /// any further handling of the press. Auto-repeats and composition
    /// input never fire. A chord registered for the capture pass is only
    /// eligible there, and vice versa, so calling both passes in order
    /// fires at most one binding per press.
    pub fn dispatch(&mut self, input: &KeyInput, phase: Phase) -> bool {
        if input.repeat {
            return false;
        }
        let Some(chord) = self.chord_of(input) else {
            return false;
        };
        let capture_key = self.capture_keys.contains(&chord);
        if (phase == Phase::Capture) != capture_key {
            return false;
        }
        let typing = self.in_typing_context();
        let Some(binding) = self.bindings.get_mut(&chord) else {
            return false;
        };
        if typing && !binding.allow_while_typing {
            return false;
        }
        debug!("shortcut fired: {chord}");
        match &mut binding.action {
            BoundAction::Callback(run) => run(),
            BoundAction::Control { id, interaction } => match self.controls.as_deref_mut() {
                Some(host) => {
                    if !host.apply(id, *interaction) {
                        warn!("control {id:?} rejected {}", interaction.name());
                    }
                }
                None => warn!("control {id:?} bound without a control host"),
            },
        }
        true
    }

    fn in_typing_context(&self) -> bool {
        match &self.controls {
            Some(host) => host.in_typing_context(),
            None => self.typing,
        }
    }

    /// Registered bindings in registration order, as (chord, description).
    pub fn entries(&self) -> impl Iterator<Item = (&Chord, &str)> {
        self.bindings
            .iter()
            .map(|(chord, binding)| (chord, binding.description.as_str()))
    }

    /// Help listing in registration order, with chords rendered through the
    /// configured display format. Does not mutate the registry.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.bindings
            .iter()
            .map(|(chord, binding)| HelpEntry {
                keys: self.display.format_chord(chord),
                description: binding.description.clone(),
            })
            .collect()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("bindings", &self.bindings)
            .field("capture_keys", &self.capture_keys)
            .field("absorb_numpad", &self.absorb_numpad)
            .field("typing", &self.typing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyInput {
        KeyInput::press(code, modifiers)
    }

    fn ctrl_s() -> KeyInput {
        press(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    /// Run one press through both passes in order, the way a host would.
    fn press_both_phases(registry: &mut ShortcutRegistry, input: &KeyInput) -> bool {
        registry.dispatch(input, Phase::Capture) || registry.dispatch(input, Phase::Bubble)
    }

    fn counter_binding(registry: &mut ShortcutRegistry, chord: &str) -> Rc<RefCell<u32>> {
        let count = Rc::new(RefCell::new(0));
        let hits = Rc::clone(&count);
        registry.bind(chord, move || *hits.borrow_mut() += 1, BindOptions::default());
        count
    }

    #[test]
    fn test_bind_and_dispatch_once() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "Ctrl+S");

        assert!(press_both_phases(&mut registry, &ctrl_s()));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_duplicate_bind_keeps_first() {
        let mut registry = ShortcutRegistry::new();
        // Same canonical chord, modifiers written in a different order.
        let first = counter_binding(&mut registry, "Shift+Ctrl+G");
        let second = counter_binding(&mut registry, "Ctrl+Shift+G");
        assert_eq!(registry.len(), 1);

        let input = press(KeyCode::Char('G'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        press_both_phases(&mut registry, &input);
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 0);
    }

    #[test]
    fn test_second_bind_does_not_replace() {
        let mut registry = ShortcutRegistry::new();
        let first = counter_binding(&mut registry, "Ctrl+S");
        let second = counter_binding(&mut registry, "ctrl+s");

        press_both_phases(&mut registry, &ctrl_s());
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 0);
    }

    #[test]
    fn test_overwrite_replaces() {
        let mut registry = ShortcutRegistry::new();
        let first = counter_binding(&mut registry, "Ctrl+S");

        let replacement = Rc::new(RefCell::new(0));
        let hits = Rc::clone(&replacement);
        registry.overwrite("Ctrl+S", move || *hits.borrow_mut() += 1, BindOptions::default());

        press_both_phases(&mut registry, &ctrl_s());
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*replacement.borrow(), 1);
    }

    #[test]
    fn test_unbind() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "Ctrl+S");

        registry.unbind("ctrl+s");
        assert!(!press_both_phases(&mut registry, &ctrl_s()));
        assert_eq!(*count.borrow(), 0);

        // Absent chords are fine to unbind again.
        registry.unbind("Ctrl+S");
    }

    #[test]
    fn test_malformed_chord_is_skipped() {
        let mut registry = ShortcutRegistry::new();
        registry.bind("Ctrl+Ctrl", || {}, BindOptions::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_capture_binding_fires_exactly_once() {
        let mut registry = ShortcutRegistry::new();
        let count = Rc::new(RefCell::new(0));
        let hits = Rc::clone(&count);
        registry.bind(
            "Alt+1",
            move || *hits.borrow_mut() += 1,
            BindOptions::describe("heading level 1").capture(),
        );

        let input = press(KeyCode::Char('1'), KeyModifiers::ALT);
        assert!(registry.dispatch(&input, Phase::Capture));
        assert!(!registry.dispatch(&input, Phase::Bubble));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_bubble_binding_skips_capture_pass() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "Ctrl+S");

        assert!(!registry.dispatch(&ctrl_s(), Phase::Capture));
        assert!(registry.dispatch(&ctrl_s(), Phase::Bubble));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_repeat_never_fires() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "Ctrl+S");

        assert!(!press_both_phases(&mut registry, &ctrl_s().repeating()));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_composition_never_fires() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "Ctrl+S");

        assert!(!press_both_phases(&mut registry, &ctrl_s().while_composing()));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_typing_guard() {
        let mut registry = ShortcutRegistry::new();
        let guarded = counter_binding(&mut registry, "Ctrl+S");

        let allowed = Rc::new(RefCell::new(0));
        let hits = Rc::clone(&allowed);
        registry.bind(
            "Escape",
            move || *hits.borrow_mut() += 1,
            BindOptions::describe("leave field").while_typing(),
        );

        registry.set_typing(true);
        assert!(!press_both_phases(&mut registry, &ctrl_s()));
        assert_eq!(*guarded.borrow(), 0);

        let escape = press(KeyCode::Esc, KeyModifiers::NONE);
        assert!(press_both_phases(&mut registry, &escape));
        assert_eq!(*allowed.borrow(), 1);

        registry.set_typing(false);
        assert!(press_both_phases(&mut registry, &ctrl_s()));
        assert_eq!(*guarded.borrow(), 1);
    }

    #[test]
    fn test_plain_and_modified_chords_are_distinct() {
        let mut registry = ShortcutRegistry::new();
        let plain = counter_binding(&mut registry, "ArrowUp");

        let ctrl_up = press(KeyCode::Up, KeyModifiers::CONTROL);
        assert!(!press_both_phases(&mut registry, &ctrl_up));
        assert_eq!(*plain.borrow(), 0);

        let up = press(KeyCode::Up, KeyModifiers::NONE);
        assert!(press_both_phases(&mut registry, &up));
        assert_eq!(*plain.borrow(), 1);
    }

    #[test]
    fn test_numpad_absorption() {
        let mut registry = ShortcutRegistry::new();
        let count = counter_binding(&mut registry, "7");

        let keypad_seven = press(KeyCode::Char('7'), KeyModifiers::NONE).on_keypad();
        assert!(press_both_phases(&mut registry, &keypad_seven));
        assert_eq!(*count.borrow(), 1);

        registry.set_absorb_numpad(false);
        assert!(!press_both_phases(&mut registry, &keypad_seven));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_keypad_binding_without_absorption() {
        let mut registry = ShortcutRegistry::new();
        registry.set_absorb_numpad(false);
        let count = counter_binding(&mut registry, "NumpadEnter");

        let keypad_enter = press(KeyCode::Enter, KeyModifiers::NONE).on_keypad();
        assert!(press_both_phases(&mut registry, &keypad_enter));

        let plain_enter = press(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!press_both_phases(&mut registry, &plain_enter));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_help_entries_are_ordered_and_stable() {
        let mut registry = ShortcutRegistry::new();
        registry.bind("Ctrl+S", || {}, BindOptions::describe("save structure"));
        registry.bind("ArrowUp", || {}, BindOptions::describe("move paragraph up"));
        registry.bind("Alt+.", || {}, BindOptions::describe("toggle grouping"));

        let entries = registry.help_entries();
        let keys: Vec<_> = entries.iter().map(|e| e.keys.as_str()).collect();
        assert_eq!(keys, ["Ctrl+S", "Up", "Alt+."]);
        assert_eq!(entries[0].description, "save structure");

        // Introspection does not mutate.
        assert_eq!(registry.help_entries(), entries);

        registry.unbind("ArrowUp");
        let keys: Vec<_> = registry
            .help_entries()
            .into_iter()
            .map(|e| e.keys)
            .collect();
        assert_eq!(keys, ["Ctrl+S", "Alt+."]);
    }

    // --- control targets ---

    #[derive(Default)]
    struct FakePanel {
        applied: Vec<(String, &'static str)>,
        typing: bool,
    }

    impl ControlHost for Rc<RefCell<FakePanel>> {
        fn contains(&self, id: &str) -> bool {
            matches!(id, "save" | "auto-scroll" | "search" | "status")
        }

        fn default_interaction(&self, id: &str) -> Option<Interaction> {
            match id {
                "save" => Some(Interaction::Click),
                "auto-scroll" => Some(Interaction::Toggle),
                "search" => Some(Interaction::Focus),
                _ => None,
            }
        }

        fn apply(&mut self, id: &str, interaction: Interaction) -> bool {
            if !self.contains(id) {
                return false;
            }
            self.borrow_mut().applied.push((id.to_string(), interaction.name()));
            true
        }

        fn in_typing_context(&self) -> bool {
            self.borrow().typing
        }
    }

    #[test]
    fn test_control_binding_applies_interaction() {
        let panel = Rc::new(RefCell::new(FakePanel::default()));
        let mut registry = ShortcutRegistry::with_controls(Rc::clone(&panel));

        registry.bind_control("Ctrl+S", "save:click", BindOptions::describe("save"));
        assert!(press_both_phases(&mut registry, &ctrl_s()));
        assert_eq!(panel.borrow().applied, [("save".to_string(), "click")]);
    }

    #[test]
    fn test_control_binding_infers_interaction() {
        let panel = Rc::new(RefCell::new(FakePanel::default()));
        let mut registry = ShortcutRegistry::with_controls(Rc::clone(&panel));

        registry.bind_control("Alt+S", "auto-scroll", BindOptions::default());
        let input = press(KeyCode::Char('s'), KeyModifiers::ALT);
        assert!(press_both_phases(&mut registry, &input));
        assert_eq!(panel.borrow().applied, [("auto-scroll".to_string(), "toggle")]);
    }

    #[test]
    fn test_unknown_control_is_not_installed() {
        let panel = Rc::new(RefCell::new(FakePanel::default()));
        let mut registry = ShortcutRegistry::with_controls(Rc::clone(&panel));

        registry.bind_control("Ctrl+S", "missing", BindOptions::default());
        assert!(registry.is_empty());
        assert!(!press_both_phases(&mut registry, &ctrl_s()));
    }

    #[test]
    fn test_control_without_inferable_interaction_is_not_installed() {
        let panel = Rc::new(RefCell::new(FakePanel::default()));
        let mut registry = ShortcutRegistry::with_controls(Rc::clone(&panel));

        // "status" exists but has no default interaction and none is given.
        registry.bind_control("Ctrl+S", "status", BindOptions::default());
        assert!(registry.is_empty());

        // An explicit interaction makes it bindable.
        registry.bind_control("Ctrl+S", "status:cycle-next", BindOptions::default());
        assert!(registry.is_bound("Ctrl+S"));
    }

    #[test]
    fn test_host_reports_typing_context() {
        let panel = Rc::new(RefCell::new(FakePanel::default()));
        let mut registry = ShortcutRegistry::with_controls(Rc::clone(&panel));
        registry.bind_control("Ctrl+S", "save", BindOptions::default());

        panel.borrow_mut().typing = true;
        assert!(!press_both_phases(&mut registry, &ctrl_s()));

        panel.borrow_mut().typing = false;
        assert!(press_both_phases(&mut registry, &ctrl_s()));
    }
}
