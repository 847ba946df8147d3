//! TOML shortcut configuration.

use crate::registry::{BindOptions, Phase, ShortcutRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Error loading or saving a shortcut configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Declarative shortcut bindings, loaded from TOML.
///
/// Only control-target bindings can be declared this way; callback
/// bindings are code. Entries that fail to bind follow the registry's
/// warn-and-skip semantics, so one bad line never rejects the whole file.
///
/// ```toml
/// absorb_numpad = true
///
/// [[bindings]]
/// chord = "Ctrl+S"
/// control = "save:click"
/// description = "Save document structure"
///
/// [[bindings]]
/// chord = "Alt+1"
/// control = "heading-1"
/// capture = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutConfig {
    /// Collapse keypad keys onto their main-keyboard equivalents.
    #[serde(default = "default_absorb_numpad")]
    pub absorb_numpad: bool,
    /// The declared bindings.
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

/// One declared binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEntry {
    /// Chord notation, e.g. `"Ctrl+Shift+G"`.
    pub chord: String,
    /// Control target, `"id"` or `"id:interaction"`.
    pub control: String,
    /// Help description.
    #[serde(default)]
    pub description: String,
    /// Listen on the capture pass.
    #[serde(default)]
    pub capture: bool,
    /// Fire even while a typing surface has focus.
    #[serde(default)]
    pub allow_while_typing: bool,
}

fn default_absorb_numpad() -> bool {
    true
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            absorb_numpad: true,
            bindings: Vec::new(),
        }
    }
}

impl ShortcutConfig {
    /// Parse a configuration from TOML text.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_str(&std::fs::read_to_string(path)?)
    }

    /// Save this configuration.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Apply the declared bindings to a registry.
    pub fn apply(&self, registry: &mut ShortcutRegistry) {
        registry.set_absorb_numpad(self.absorb_numpad);
        for entry in &self.bindings {
            let mut options = BindOptions::describe(entry.description.clone());
            if entry.capture {
                options.phase = Phase::Capture;
            }
            options.allow_while_typing = entry.allow_while_typing;
            registry.bind_control(&entry.chord, &entry.control, options);
        }
    }
}
