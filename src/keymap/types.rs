//! Core types for the keymap system: Modifiers, KeySpec, ComboDescriptor, KeyCombo

use std::fmt;

use serde::{Deserialize, Serialize};

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Canonical modifier names in alphabetical order
    const NAMED: [(Modifiers, &'static str); 4] = [
        (Modifiers::ALT, "alt"),
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::META, "meta"),
        (Modifiers::SHIFT, "shift"),
    ];

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove the modifiers in other from this set
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Get the platform-specific "command" modifier (Cmd on macOS, Ctrl elsewhere)
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }

    /// Canonical names of the held modifiers, alphabetically sorted
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }

    /// Canonical name of a single modifier flag
    pub(crate) fn name_of(flag: Modifiers) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|(_, name)| *name)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Structured combo descriptor: modifier flags plus a base key
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    #[serde(default, skip_serializing_if = "is_false")]
    pub ctrl: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub alt: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shift: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub meta: bool,
    pub key: String,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl KeySpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::new(self.ctrl, self.alt, self.shift, self.meta)
    }
}

/// Either representation a caller may use to describe a combo
///
/// In YAML a plain string (`"ctrl+s"`) and a mapping
/// (`{ctrl: true, key: s}`) are both accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComboDescriptor {
    /// `"mod+mod+key"` shorthand
    Text(String),
    /// Modifier flags plus base key
    Keys(KeySpec),
}

impl From<&str> for ComboDescriptor {
    fn from(text: &str) -> Self {
        ComboDescriptor::Text(text.to_string())
    }
}

impl From<String> for ComboDescriptor {
    fn from(text: String) -> Self {
        ComboDescriptor::Text(text)
    }
}

impl From<&String> for ComboDescriptor {
    fn from(text: &String) -> Self {
        ComboDescriptor::Text(text.clone())
    }
}

impl From<KeySpec> for ComboDescriptor {
    fn from(spec: KeySpec) -> Self {
        ComboDescriptor::Keys(spec)
    }
}

impl fmt::Display for ComboDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboDescriptor::Text(text) => write!(f, "{}", text),
            ComboDescriptor::Keys(spec) => {
                let mods = spec.modifiers();
                if mods.is_empty() {
                    write!(f, "{}", spec.key)
                } else {
                    write!(f, "{}+{}", mods, spec.key)
                }
            }
        }
    }
}

/// Canonical combo: sorted lowercase modifiers, `+`, lowercase base key
///
/// Two descriptors of the same physical combination always produce equal
/// values, so this is the lookup key of every binding table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyCombo(String);

impl KeyCombo {
    /// Join a prefix (modifier and stray tokens) with the base key
    pub(crate) fn assemble(mods: Modifiers, extra: Vec<String>, key: &str) -> Self {
        let mut prefix: Vec<String> = mods.names().map(str::to_string).collect();
        prefix.extend(extra);
        prefix.sort();
        prefix.dedup();

        if prefix.is_empty() {
            KeyCombo(key.to_string())
        } else {
            KeyCombo(format!("{}+{}", prefix.join("+"), key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyCombo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifier_names_are_alphabetical() {
        let all = Modifiers::new(true, true, true, true);
        let names: Vec<&str> = all.names().collect();
        assert_eq!(names, vec!["alt", "ctrl", "meta", "shift"]);
    }

    #[test]
    fn test_without_clears_flag() {
        let mods = (Modifiers::CTRL | Modifiers::SHIFT).without(Modifiers::SHIFT);
        assert_eq!(mods, Modifiers::CTRL);
    }

    #[test]
    fn test_assemble_without_prefix() {
        assert_eq!(
            KeyCombo::assemble(Modifiers::NONE, vec![], "enter").as_str(),
            "enter"
        );
    }

    #[test]
    fn test_descriptor_display() {
        let desc = ComboDescriptor::from(KeySpec::new("S").ctrl().shift());
        assert_eq!(desc.to_string(), "ctrl+shift+S");
    }

    #[test]
    fn test_descriptor_deserializes_both_forms() {
        let text: ComboDescriptor = serde_yaml::from_str("\"ctrl+s\"").unwrap();
        assert_eq!(text, ComboDescriptor::Text("ctrl+s".into()));

        let keys: ComboDescriptor = serde_yaml::from_str("{ctrl: true, key: s}").unwrap();
        assert_eq!(keys, ComboDescriptor::Keys(KeySpec::new("s").ctrl()));
    }
}
