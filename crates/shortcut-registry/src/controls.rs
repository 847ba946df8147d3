//! Named-control targets for shortcut actions.

/// An interaction a shortcut can synthesize on a named control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Activate the control (press a button, select a radio option).
    Click,
    /// Flip a two-state control.
    Toggle,
    /// Move focus to the control.
    Focus,
    /// Select the next option in a control group, wrapping around.
    CycleNext,
    /// Select the previous option in a control group, wrapping around.
    CyclePrev,
}

impl Interaction {
    /// Parse an interaction name as written in a binding target.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "toggle" => Some(Self::Toggle),
            "focus" => Some(Self::Focus),
            "cycle-next" => Some(Self::CycleNext),
            "cycle-prev" => Some(Self::CyclePrev),
            _ => None,
        }
    }

    /// Canonical name of this interaction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Toggle => "toggle",
            Self::Focus => "focus",
            Self::CycleNext => "cycle-next",
            Self::CyclePrev => "cycle-prev",
        }
    }
}

/// The application surface that owns named controls.
///
/// A registry constructed with [`crate::ShortcutRegistry::with_controls`]
/// resolves control-target bindings against this trait: existence is
/// checked once at bind time, interactions are applied at dispatch time.
pub trait ControlHost {
    /// Whether a control (or control group) with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// The interaction a bare target id implies, by control kind:
    /// button-like controls click, two-state controls toggle, editable
    /// controls take focus. None if the control cannot be inferred.
    fn default_interaction(&self, id: &str) -> Option<Interaction>;

    /// Apply an interaction. Returns false if the control no longer exists
    /// or does not support the interaction.
    fn apply(&mut self, id: &str, interaction: Interaction) -> bool;

    /// Whether keyboard focus is currently on a typing surface (an editable
    /// control where a keystroke is expected to produce text).
    fn in_typing_context(&self) -> bool {
        false
    }
}

/// Split a binding target of the form `"id"` or `"id:interaction"`.
///
/// The suffix is only treated as an interaction when it names one; anything
/// else stays part of the id, so ids containing `:` keep working.
pub fn parse_target(target: &str) -> (&str, Option<Interaction>) {
    if let Some((id, suffix)) = target.rsplit_once(':') {
        if let Some(interaction) = Interaction::from_name(suffix) {
            return (id, Some(interaction));
        }
    }
    (target, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_with_interaction() {
        assert_eq!(parse_target("save:click"), ("save", Some(Interaction::Click)));
        assert_eq!(
            parse_target("status:cycle-next"),
            ("status", Some(Interaction::CycleNext))
        );
    }

    #[test]
    fn test_parse_target_bare() {
        assert_eq!(parse_target("save"), ("save", None));
    }

    #[test]
    fn test_unknown_suffix_stays_in_id() {
        assert_eq!(parse_target("panel:main"), ("panel:main", None));
    }

    #[test]
    fn test_interaction_names_round_trip() {
        for interaction in [
            Interaction::Click,
            Interaction::Toggle,
            Interaction::Focus,
            Interaction::CycleNext,
            Interaction::CyclePrev,
        ] {
            assert_eq!(Interaction::from_name(interaction.name()), Some(interaction));
        }
    }
}
