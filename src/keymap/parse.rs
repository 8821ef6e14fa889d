//! Combo canonicalization: descriptors and key events into `KeyCombo`
//!
//! Two entry points share one tokenizer:
//! - [`canonicalize`] is total and never fails; it backs runtime registration
//! - [`KeyCombo::parse`] is strict and backs config loading

use crate::host::KeyEvent;

use super::types::{ComboDescriptor, KeyCombo, KeySpec, Modifiers};

/// A lowercased token of a combo descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Modifier(Modifiers),
    Key(String),
}

/// Map a lowercased token to the modifier it names, if any
fn modifier_for(token: &str) -> Option<Modifiers> {
    match token {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "alt" | "option" | "opt" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "meta" | "super" | "win" | "command" => Some(Modifiers::META),
        // Platform command key
        "cmd" => Some(Modifiers::cmd()),
        _ => None,
    }
}

/// Normalize a lowercased base key name to the form key events report
fn normalize_key(key: &str) -> String {
    if !key.is_empty() && key.trim().is_empty() {
        return "space".to_string();
    }
    match key {
        "space" | "spacebar" => "space".to_string(),
        "esc" => "escape".to_string(),
        "return" => "enter".to_string(),
        "del" => "delete".to_string(),
        "up" => "arrowup".to_string(),
        "down" => "arrowdown".to_string(),
        "left" => "arrowleft".to_string(),
        "right" => "arrowright".to_string(),
        "pgup" => "pageup".to_string(),
        "pgdn" | "pgdown" => "pagedown".to_string(),
        other => other.to_string(),
    }
}

/// Split a `"mod+mod+key"` string into tokens
///
/// A trailing `+` after a separator (`"ctrl++"`, or `"+"` alone) is the plus key.
fn tokenize(text: &str) -> Vec<Token> {
    let lower = text.to_lowercase();
    let (body, plus_key) = if lower == "+" {
        ("", true)
    } else if let Some(rest) = lower.strip_suffix("++") {
        (rest, true)
    } else {
        (lower.as_str(), false)
    };

    let mut tokens: Vec<Token> = body
        .split('+')
        .filter_map(|part| {
            // A whitespace-only part is the space key itself
            if !part.is_empty() && part.trim().is_empty() {
                return Some(Token::Key(normalize_key(" ")));
            }
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            Some(match modifier_for(part) {
                Some(mods) => Token::Modifier(mods),
                None => Token::Key(normalize_key(part)),
            })
        })
        .collect();

    if plus_key {
        tokens.push(Token::Key("+".to_string()));
    }
    tokens
}

/// Fold modifiers and a base key, treating a base key that names a
/// modifier as that modifier's canonical name
fn fold(mods: Modifiers, key: &str) -> KeyCombo {
    let lower = key.to_lowercase();
    match modifier_for(&lower) {
        Some(flag) => {
            let name = Modifiers::name_of(flag).unwrap_or("ctrl");
            KeyCombo::assemble(mods.without(flag), Vec::new(), name)
        }
        None => KeyCombo::assemble(mods, Vec::new(), &normalize_key(&lower)),
    }
}

/// Canonicalize any combo descriptor
///
/// Order, case and representation never change the result:
/// `"Ctrl+S"`, `"s+ctrl"` and `KeySpec::new("S").ctrl()` all become `ctrl+s`.
///
/// Malformed input still yields a value. With no base key the last
/// modifier stands in for it, and stray extra keys join the sorted prefix.
pub fn canonicalize(combo: impl Into<ComboDescriptor>) -> KeyCombo {
    match combo.into() {
        ComboDescriptor::Text(text) => canonicalize_text(&text),
        ComboDescriptor::Keys(spec) => canonicalize_spec(&spec),
    }
}

fn canonicalize_text(text: &str) -> KeyCombo {
    let mut mods = Modifiers::NONE;
    let mut last_modifier = None;
    let mut keys = Vec::new();

    for token in tokenize(text) {
        match token {
            Token::Modifier(flag) => {
                mods |= flag;
                last_modifier = Some(flag);
            }
            Token::Key(key) => keys.push(key),
        }
    }

    match keys.pop() {
        Some(key) => KeyCombo::assemble(mods, keys, &key),
        None => match last_modifier {
            Some(flag) => fold(mods, Modifiers::name_of(flag).unwrap_or("ctrl")),
            None => KeyCombo::assemble(Modifiers::NONE, Vec::new(), ""),
        },
    }
}

fn canonicalize_spec(spec: &KeySpec) -> KeyCombo {
    fold(spec.modifiers(), &spec.key)
}

impl KeyCombo {
    /// Derive the combo a key event represents
    pub fn from_event(event: &KeyEvent) -> Self {
        let mods = Modifiers::new(event.ctrl, event.alt, event.shift, event.meta);
        fold(mods, &event.key)
    }

    /// Strictly parse a `"mod+mod+key"` string
    ///
    /// Unlike [`canonicalize`], this rejects empty descriptors and those with
    /// more than one base key. A modifier-only descriptor uses its last
    /// modifier as the key, as the structured form does.
    pub fn parse(text: &str) -> Result<Self, KeymapError> {
        let mut mods = Modifiers::NONE;
        let mut last_modifier = None;
        let mut key = None;

        for token in tokenize(text) {
            match token {
                Token::Modifier(flag) => {
                    mods |= flag;
                    last_modifier = Some(flag);
                }
                Token::Key(k) => {
                    if key.is_some() {
                        return Err(KeymapError::InvalidKey(format!(
                            "Multiple keys in binding: {}",
                            text
                        )));
                    }
                    key = Some(k);
                }
            }
        }

        match (key, last_modifier) {
            (Some(key), _) => Ok(KeyCombo::assemble(mods, Vec::new(), &key)),
            (None, Some(flag)) => Ok(fold(mods, Modifiers::name_of(flag).unwrap_or("ctrl"))),
            (None, None) => Err(KeymapError::InvalidKey(format!(
                "No key found in binding: {}",
                text
            ))),
        }
    }

    /// Strictly canonicalize either descriptor form
    pub fn from_descriptor(desc: &ComboDescriptor) -> Result<Self, KeymapError> {
        match desc {
            ComboDescriptor::Text(text) => Self::parse(text),
            ComboDescriptor::Keys(spec) if spec.key.is_empty() => Err(
                KeymapError::InvalidKey(format!("No key found in binding: {}", desc)),
            ),
            ComboDescriptor::Keys(spec) => Ok(canonicalize_spec(spec)),
        }
    }
}

/// Errors that can occur when parsing combos strictly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    InvalidKey(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        assert_eq!(KeyCombo::parse("a").unwrap().as_str(), "a");
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        assert_eq!(
            KeyCombo::parse("Shift+Ctrl+I").unwrap().as_str(),
            "ctrl+shift+i"
        );
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(matches!(
            KeyCombo::parse(""),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_modifier_only_forms_agree() {
        let text = KeyCombo::parse("shift+ctrl").unwrap();
        let keys =
            KeyCombo::from_descriptor(&ComboDescriptor::Keys(KeySpec::new("ctrl").shift()))
                .unwrap();
        assert_eq!(text, keys);
        assert_eq!(text, canonicalize("shift+ctrl"));
        assert_eq!(text.as_str(), "shift+ctrl");
    }

    #[test]
    fn test_parse_rejects_two_keys() {
        assert!(KeyCombo::parse("ctrl+a+b").is_err());
    }

    #[test]
    fn test_parse_cmd_modifier() {
        let combo = KeyCombo::parse("cmd+s").unwrap();
        if cfg!(target_os = "macos") {
            assert_eq!(combo.as_str(), "meta+s");
        } else {
            assert_eq!(combo.as_str(), "ctrl+s");
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(canonicalize("Control+Option+Esc").as_str(), "alt+ctrl+escape");
        assert_eq!(canonicalize("super+return").as_str(), "meta+enter");
        assert_eq!(canonicalize("shift+left").as_str(), "shift+arrowleft");
    }

    #[test]
    fn test_plus_key() {
        assert_eq!(canonicalize("ctrl++").as_str(), "ctrl++");
        assert_eq!(canonicalize("+").as_str(), "+");
        assert_eq!(KeyCombo::parse("shift++").unwrap().as_str(), "shift++");
    }

    #[test]
    fn test_space_key() {
        assert_eq!(canonicalize(" ").as_str(), "space");
        assert_eq!(canonicalize("ctrl+space").as_str(), "ctrl+space");
        let event = KeyEvent::down(" ").with_ctrl();
        assert_eq!(KeyCombo::from_event(&event).as_str(), "ctrl+space");
    }

    #[test]
    fn test_literal_space_after_modifier() {
        assert_eq!(canonicalize("ctrl+ "), canonicalize("ctrl+space"));
        assert_eq!(canonicalize("Shift+ ").as_str(), "shift+space");
        assert_eq!(canonicalize(" +").as_str(), "space");
        assert_eq!(KeyCombo::parse("ctrl+ ").unwrap().as_str(), "ctrl+space");

        let event = KeyEvent::down(" ").with_ctrl();
        assert_eq!(KeyCombo::from_event(&event), canonicalize("ctrl+ "));
        let spec = ComboDescriptor::Keys(KeySpec::new(" ").ctrl());
        assert_eq!(KeyCombo::from_descriptor(&spec).unwrap().as_str(), "ctrl+space");
    }

    #[test]
    fn test_only_modifiers_is_total() {
        assert_eq!(canonicalize("ctrl+shift").as_str(), "ctrl+shift");
        assert_eq!(canonicalize("ctrl").as_str(), "ctrl");
        assert_eq!(canonicalize("").as_str(), "");
    }

    #[test]
    fn test_stray_keys_join_prefix() {
        assert_eq!(canonicalize("b+a+ctrl").as_str(), "b+ctrl+a");
    }

    #[test]
    fn test_modifier_keypress_matches_modifier_descriptor() {
        let event = KeyEvent::down("Shift").with_ctrl().with_shift();
        assert_eq!(KeyCombo::from_event(&event), canonicalize("ctrl+shift"));
        let event = KeyEvent::down("Control").with_ctrl();
        assert_eq!(KeyCombo::from_event(&event), canonicalize("ctrl"));
    }

    #[test]
    fn test_from_descriptor_rejects_empty_spec_key() {
        let desc = ComboDescriptor::Keys(KeySpec::new("").ctrl());
        assert!(KeyCombo::from_descriptor(&desc).is_err());
    }
}
