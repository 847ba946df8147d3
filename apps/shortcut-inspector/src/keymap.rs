//! Shortcut declarations for the inspector.

use crate::panel::PanelHandle;
use shortcut_registry::{BindOptions, ShortcutRegistry};
use std::cell::Cell;
use std::rc::Rc;

/// Install the default bindings.
///
/// Control targets go through the panel; application-level actions (help,
/// quit) are plain callbacks. The Alt layer uses the capture pass so those
/// chords win over any focused widget.
pub fn install(
    registry: &mut ShortcutRegistry,
    panel: &PanelHandle,
    show_help: &Rc<Cell<bool>>,
    quit: &Rc<Cell<bool>>,
) {
    registry.bind_control(
        "Ctrl+S",
        "save:click",
        BindOptions::describe("Save document structure"),
    );
    registry.bind_control(
        "Ctrl+T",
        "retranslate",
        BindOptions::describe("Re-translate current page"),
    );
    registry.bind_control(
        "Ctrl+L",
        "search:focus",
        BindOptions::describe("Focus paragraph search"),
    );

    registry.bind_control(
        "Alt+1",
        "show-source",
        BindOptions::describe("Toggle source text").capture(),
    );
    registry.bind_control(
        "Alt+2",
        "show-translation",
        BindOptions::describe("Toggle translation").capture(),
    );
    registry.bind_control(
        "Alt+3",
        "auto-scroll",
        BindOptions::describe("Toggle auto-scroll").capture(),
    );

    registry.bind_control(
        "Alt+N",
        "status-none",
        BindOptions::describe("Mark status: none").capture(),
    );
    registry.bind_control(
        "Alt+A",
        "status-auto",
        BindOptions::describe("Mark status: auto").capture(),
    );
    registry.bind_control(
        "Alt+D",
        "status-draft",
        BindOptions::describe("Mark status: draft").capture(),
    );
    registry.bind_control(
        "Alt+F",
        "status-fixed",
        BindOptions::describe("Mark status: fixed").capture(),
    );

    registry.bind_control(
        "Ctrl+Right",
        "status:cycle-next",
        BindOptions::describe("Next translation status"),
    );
    registry.bind_control(
        "Ctrl+Left",
        "status:cycle-prev",
        BindOptions::describe("Previous translation status"),
    );

    let handle = panel.clone();
    registry.bind(
        "Ctrl++",
        move || handle.borrow_mut().note("font size up"),
        BindOptions::describe("Increase font size"),
    );

    for chord in ["F1", "?"] {
        let help = Rc::clone(show_help);
        registry.bind(
            chord,
            move || help.set(!help.get()),
            BindOptions::describe("Toggle this help"),
        );
    }

    let handle = panel.clone();
    let help = Rc::clone(show_help);
    registry.bind(
        "Escape",
        move || {
            help.set(false);
            let mut panel = handle.borrow_mut();
            panel.focused = None;
            panel.note("focus cleared");
        },
        BindOptions::describe("Clear focus / close help").while_typing(),
    );

    let flag = Rc::clone(quit);
    registry.bind(
        "Q",
        move || flag.set(true),
        BindOptions::describe("Quit"),
    );
}
