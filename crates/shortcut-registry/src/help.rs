//! Help listing for registered shortcuts.

/// One row of the shortcut help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// The chord, rendered for display.
    pub keys: String,
    /// The description supplied at bind time.
    pub description: String,
}

/// Render help entries as a plain-text two-column table.
///
/// A convenience for hosts without richer table widgets; the column width
/// follows the longest key label. No trailing newline.
pub fn render_help(entries: &[HelpEntry]) -> String {
    let key_width = entries
        .iter()
        .map(|entry| entry.keys.chars().count())
        .chain(std::iter::once("Key".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{:<key_width$}  {}", "Key", "Description")];
    for entry in entries {
        lines.push(format!("{:<key_width$}  {}", entry.keys, entry.description));
    }
    lines.join("\n")
}
