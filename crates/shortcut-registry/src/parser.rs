//! Chord notation parser.

use crate::chord::Chord;
use crossterm::event::{KeyCode, KeyModifiers};
use thiserror::Error;

/// Error parsing a chord notation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Empty input.
    #[error("empty chord notation")]
    Empty,
    /// A token before the base key is not a modifier name.
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    /// The base key token is itself a modifier name.
    #[error("modifier used as base key: {0}")]
    ModifierAsKey(String),
    /// The base key token is not a recognized key name.
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Parse a chord notation string into a normalized [`Chord`].
///
/// Tokens are separated by `+` and matched case-insensitively; the last
/// token is the base key, everything before it must be a modifier. A chord
/// ending in `++` binds the literal `+` character (e.g. `"Ctrl++"`).
///
/// Supported notations:
/// - `"ctrl+s"`, `"Ctrl+Shift+G"`, `"meta+p"` - modified keys
/// - `"enter"`, `"escape"`, `"space"`, `"f5"` - named keys
/// - `"up"` / `"arrowup"` and friends - arrow keys, either spelling
/// - `"numpad7"`, `"numpadenter"` - keypad keys, kept distinct from the
///   main keyboard
pub fn parse_chord(s: &str) -> Result<Chord, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    // A trailing separator means the base key is the literal '+'.
    let (modifier_str, key_token) = if let Some(rest) = s.strip_suffix('+') {
        (rest.strip_suffix('+').unwrap_or(rest), "+")
    } else {
        match s.rsplit_once('+') {
            Some((mods, key)) => (mods, key),
            None => ("", s),
        }
    };

    let mut modifiers = KeyModifiers::NONE;
    for token in modifier_str.split('+') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        modifiers |= parse_modifier(token).ok_or_else(|| {
            ParseError::UnknownModifier(token.to_string())
        })?;
    }

    let key_token = key_token.trim();
    if parse_modifier(key_token).is_some() {
        return Err(ParseError::ModifierAsKey(key_token.to_string()));
    }

    let (key, keypad) = parse_key_token(key_token)?;
    Ok(Chord::with_keypad(key, modifiers, keypad))
}

fn parse_modifier(token: &str) -> Option<KeyModifiers> {
    match token.to_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "alt" | "option" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        "meta" | "cmd" | "command" | "super" | "win" => Some(KeyModifiers::META),
        _ => None,
    }
}

fn parse_key_token(token: &str) -> Result<(KeyCode, bool), ParseError> {
    if token.is_empty() {
        return Err(ParseError::Empty);
    }

    let lower = token.to_lowercase();

    if let Some(rest) = lower.strip_prefix("numpad") {
        return parse_keypad_token(token, rest);
    }

    let key = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" | "pgdown" => KeyCode::PageDown,
        _ => {
            if let Some(n) = function_key_number(&lower) {
                KeyCode::F(n)
            } else if token.chars().count() == 1 {
                KeyCode::Char(token.chars().next().unwrap_or('+'))
            } else {
                return Err(ParseError::UnknownKey(token.to_string()));
            }
        }
    };
    Ok((key, false))
}

fn parse_keypad_token(token: &str, rest: &str) -> Result<(KeyCode, bool), ParseError> {
    let key = match rest {
        "enter" => KeyCode::Enter,
        "add" => KeyCode::Char('+'),
        "subtract" => KeyCode::Char('-'),
        "multiply" => KeyCode::Char('*'),
        "divide" => KeyCode::Char('/'),
        "decimal" => KeyCode::Char('.'),
        _ => match rest.chars().next() {
            Some(d) if rest.len() == 1 && d.is_ascii_digit() => KeyCode::Char(d),
            _ => return Err(ParseError::UnknownKey(token.to_string())),
        },
    };
    Ok((key, true))
}

fn function_key_number(lower: &str) -> Option<u8> {
    let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
    (1..=12).contains(&n).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_char() {
        let chord = parse_chord("a").unwrap();
        assert_eq!(chord.code(), KeyCode::Char('A'));
        assert_eq!(chord.modifiers(), KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_ctrl() {
        let chord = parse_chord("ctrl+s").unwrap();
        assert_eq!(chord.code(), KeyCode::Char('S'));
        assert!(chord.modifiers().contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_chord("CTRL+SHIFT+g").unwrap(), parse_chord("ctrl+shift+G").unwrap());
    }

    #[test]
    fn test_modifier_order_does_not_matter() {
        let a = parse_chord("Shift+Ctrl+G").unwrap();
        let b = parse_chord("Ctrl+Shift+G").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_parse_literal_plus() {
        let chord = parse_chord("Ctrl++").unwrap();
        assert_eq!(chord.code(), KeyCode::Char('+'));
        assert!(chord.modifiers().contains(KeyModifiers::CONTROL));

        let bare = parse_chord("+").unwrap();
        assert_eq!(bare.code(), KeyCode::Char('+'));
        assert_eq!(bare.modifiers(), KeyModifiers::NONE);
    }

    #[test]
    fn test_modifier_as_base_key_is_rejected() {
        assert_eq!(
            parse_chord("Ctrl+Ctrl"),
            Err(ParseError::ModifierAsKey("Ctrl".to_string()))
        );
        assert!(matches!(parse_chord("Shift"), Err(ParseError::ModifierAsKey(_))));
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_chord("enter").unwrap().code(), KeyCode::Enter);
        assert_eq!(parse_chord("escape").unwrap().code(), KeyCode::Esc);
        assert_eq!(parse_chord("space").unwrap().code(), KeyCode::Char(' '));
        assert_eq!(parse_chord("f5").unwrap().code(), KeyCode::F(5));
    }

    #[test]
    fn test_parse_arrow_spellings() {
        assert_eq!(parse_chord("up").unwrap(), parse_chord("ArrowUp").unwrap());
        assert_eq!(parse_chord("Ctrl+ArrowDown").unwrap(), parse_chord("ctrl+down").unwrap());
    }

    #[test]
    fn test_parse_keypad() {
        let chord = parse_chord("numpad7").unwrap();
        assert!(chord.is_keypad());
        assert_eq!(chord.code(), KeyCode::Char('7'));
        assert_ne!(chord, parse_chord("7").unwrap());

        let enter = parse_chord("Ctrl+NumpadEnter").unwrap();
        assert!(enter.is_keypad());
        assert_eq!(enter.code(), KeyCode::Enter);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_chord(""), Err(ParseError::Empty));
        assert!(matches!(parse_chord("hyper+x"), Err(ParseError::UnknownModifier(_))));
        assert!(matches!(parse_chord("ctrl+frobnicate"), Err(ParseError::UnknownKey(_))));
        assert!(matches!(parse_chord("f13"), Err(ParseError::UnknownKey(_))));
    }
}
