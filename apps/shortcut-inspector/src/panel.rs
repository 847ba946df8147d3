//! The control panel the inspector's shortcuts drive.

use shortcut_registry::{ControlHost, Interaction};
use std::cell::RefCell;
use std::rc::Rc;

const ACTIVITY_LIMIT: usize = 100;

/// Kind of a panel control.
#[derive(Debug, Clone)]
pub enum ControlKind {
    /// Fires an action when clicked.
    Button,
    /// Two-state switch.
    Toggle { on: bool },
    /// One option of a mutually exclusive group.
    Radio { group: String, selected: bool },
    /// Editable text field; focusing it makes the panel a typing surface.
    Input { text: String },
}

/// A named control.
#[derive(Debug, Clone)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub kind: ControlKind,
}

impl Control {
    fn new(id: &str, label: &str, kind: ControlKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// Panel state: the controls, keyboard focus, and an activity log.
#[derive(Debug, Default)]
pub struct Panel {
    pub controls: Vec<Control>,
    pub focused: Option<String>,
    pub activity: Vec<String>,
}

impl Panel {
    /// The demo panel: the controls a paragraph-editing screen would have.
    pub fn parapara() -> Self {
        let controls = vec![
            Control::new("save", "Save structure", ControlKind::Button),
            Control::new("retranslate", "Re-translate page", ControlKind::Button),
            Control::new("show-source", "Show source text", ControlKind::Toggle { on: true }),
            Control::new(
                "show-translation",
                "Show translation",
                ControlKind::Toggle { on: true },
            ),
            Control::new("auto-scroll", "Auto-scroll", ControlKind::Toggle { on: false }),
            Control::new(
                "status-none",
                "Status: none",
                ControlKind::Radio {
                    group: "status".to_string(),
                    selected: true,
                },
            ),
            Control::new(
                "status-auto",
                "Status: auto",
                ControlKind::Radio {
                    group: "status".to_string(),
                    selected: false,
                },
            ),
            Control::new(
                "status-draft",
                "Status: draft",
                ControlKind::Radio {
                    group: "status".to_string(),
                    selected: false,
                },
            ),
            Control::new(
                "status-fixed",
                "Status: fixed",
                ControlKind::Radio {
                    group: "status".to_string(),
                    selected: false,
                },
            ),
            Control::new(
                "search",
                "Search paragraphs",
                ControlKind::Input {
                    text: String::new(),
                },
            ),
        ];
        Self {
            controls,
            focused: None,
            activity: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.id == id)
    }

    /// Whether the id names a radio group rather than a single control.
    pub fn is_group(&self, id: &str) -> bool {
        self.controls.iter().any(
            |control| matches!(&control.kind, ControlKind::Radio { group, .. } if group == id),
        )
    }

    /// Append to the activity log, dropping the oldest entries.
    pub fn note(&mut self, message: impl Into<String>) {
        self.activity.push(message.into());
        if self.activity.len() > ACTIVITY_LIMIT {
            self.activity.remove(0);
        }
    }

    fn activate(&mut self, id: &str) -> bool {
        enum Activated {
            Pressed(String),
            Switched(String, bool),
            Radio,
            Input,
        }

        let outcome = {
            let Some(control) = self.find_mut(id) else {
                return false;
            };
            let label = control.label.clone();
            match &mut control.kind {
                ControlKind::Button => Activated::Pressed(label),
                ControlKind::Toggle { on } => {
                    *on = !*on;
                    Activated::Switched(label, *on)
                }
                ControlKind::Radio { .. } => Activated::Radio,
                ControlKind::Input { .. } => Activated::Input,
            }
        };

        match outcome {
            Activated::Pressed(label) => self.note(format!("{label} pressed")),
            Activated::Switched(label, on) => {
                let state = if on { "on" } else { "off" };
                self.note(format!("{label}: {state}"));
            }
            Activated::Radio => self.select_radio(id),
            Activated::Input => {
                self.focus(id);
            }
        }
        true
    }

    fn toggle(&mut self, id: &str) -> bool {
        let eligible = matches!(
            self.find(id).map(|control| &control.kind),
            Some(ControlKind::Toggle { .. } | ControlKind::Radio { .. })
        );
        if eligible {
            self.activate(id)
        } else {
            false
        }
    }

    fn focus(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.focused = Some(id.to_string());
        let label = self.find(id).map(|c| c.label.clone()).unwrap_or_default();
        self.note(format!("{label} focused"));
        true
    }

    fn select_radio(&mut self, id: &str) {
        let Some(group_name) = self.find(id).and_then(|control| match &control.kind {
            ControlKind::Radio { group, .. } => Some(group.clone()),
            _ => None,
        }) else {
            return;
        };
        for control in &mut self.controls {
            if let ControlKind::Radio { group, selected } = &mut control.kind {
                if *group == group_name {
                    *selected = control.id == id;
                }
            }
        }
        let label = self.find(id).map(|c| c.label.clone()).unwrap_or_default();
        self.note(format!("{label} selected"));
    }

    /// Move the selection of a radio group forward or backward, wrapping.
    fn cycle_group(&mut self, group: &str, delta: isize) -> bool {
        let members: Vec<String> = self
            .controls
            .iter()
            .filter(|control| {
                matches!(&control.kind, ControlKind::Radio { group: g, .. } if g == group)
            })
            .map(|control| control.id.clone())
            .collect();
        if members.is_empty() {
            return false;
        }
        let current = members
            .iter()
            .position(|id| {
                matches!(
                    self.find(id).map(|c| &c.kind),
                    Some(ControlKind::Radio { selected: true, .. })
                )
            })
            .unwrap_or(0) as isize;
        let len = members.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_radio(&members[next]);
        true
    }

    /// Feed a typed character to the focused input.
    pub fn type_char(&mut self, c: char) {
        if let Some(id) = self.focused.clone() {
            if let Some(ControlKind::Input { text }) = self.find_mut(&id).map(|c| &mut c.kind) {
                text.push(c);
            }
        }
    }

    /// Delete the last character of the focused input.
    pub fn backspace(&mut self) {
        if let Some(id) = self.focused.clone() {
            if let Some(ControlKind::Input { text }) = self.find_mut(&id).map(|c| &mut c.kind) {
                text.pop();
            }
        }
    }
}

/// Shared handle to the panel; this is what the registry holds.
#[derive(Clone)]
pub struct PanelHandle(Rc<RefCell<Panel>>);

impl PanelHandle {
    pub fn new(panel: Panel) -> Self {
        Self(Rc::new(RefCell::new(panel)))
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, Panel> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, Panel> {
        self.0.borrow_mut()
    }
}

impl ControlHost for PanelHandle {
    fn contains(&self, id: &str) -> bool {
        let panel = self.borrow();
        panel.find(id).is_some() || panel.is_group(id)
    }

    fn default_interaction(&self, id: &str) -> Option<Interaction> {
        let panel = self.borrow();
        match panel.find(id).map(|control| &control.kind) {
            Some(ControlKind::Button) => Some(Interaction::Click),
            Some(ControlKind::Toggle { .. }) => Some(Interaction::Toggle),
            Some(ControlKind::Radio { .. }) => Some(Interaction::Click),
            Some(ControlKind::Input { .. }) => Some(Interaction::Focus),
            // Groups need an explicit cycle direction.
            None => None,
        }
    }

    fn apply(&mut self, id: &str, interaction: Interaction) -> bool {
        let mut panel = self.borrow_mut();
        match interaction {
            Interaction::Click => panel.activate(id),
            Interaction::Toggle => panel.toggle(id),
            Interaction::Focus => panel.focus(id),
            Interaction::CycleNext => panel.cycle_group(id, 1),
            Interaction::CyclePrev => panel.cycle_group(id, -1),
        }
    }

    fn in_typing_context(&self) -> bool {
        let panel = self.borrow();
        panel
            .focused
            .as_deref()
            .and_then(|id| panel.find(id))
            .map(|control| matches!(control.kind, ControlKind::Input { .. }))
            .unwrap_or(false)
    }
}
