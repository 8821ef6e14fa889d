//! Key and pointer events as delivered by the host

use serde::{Deserialize, Serialize};

/// Events whose default host behavior can be suppressed by a listener
pub trait HostEvent {
    /// Suppress the host's default behavior for this event
    fn prevent_default(&mut self);

    /// Whether any listener suppressed the default behavior
    fn default_prevented(&self) -> bool;
}

/// Whether a key went down or came up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Down,
    Up,
}

/// A keyboard event with the standard modifier flags
///
/// `key` is the logical key as reported by the host ("s", "S", "Enter",
/// "ArrowLeft", " "). Case is preserved here and normalized by the keymap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    default_prevented: bool,
}

impl KeyEvent {
    /// Create an event with no modifiers held
    pub fn new(kind: KeyEventKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            default_prevented: false,
        }
    }

    /// A key-down event
    pub fn down(key: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Down, key)
    }

    /// A key-up event
    pub fn up(key: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Up, key)
    }

    /// Set all four modifier flags at once
    pub fn with_modifiers(mut self, ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        self.ctrl = ctrl;
        self.alt = alt;
        self.shift = shift;
        self.meta = meta;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.kind == KeyEventKind::Down
    }
}

impl HostEvent for KeyEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Pointer and touch event types observed on a root element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Click,
    MouseDown,
    MouseUp,
    /// Delivered to the root in the capture phase, so descendants report too
    MouseEnter,
    TouchStart,
    TouchEnd,
}

/// The element an event was targeted at
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    /// Element tag name, e.g. "BUTTON" or "input"
    pub tag: String,
    /// Checked state for checkbox-like inputs
    pub checked: bool,
}

impl Target {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            checked: false,
        }
    }

    /// A target whose checked state is set
    pub fn checked(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            checked: true,
        }
    }
}

/// A pointer or touch event with its target and horizontal coordinate
///
/// For touch events `client_x` is the coordinate of the first touch
/// (touch-start) or first changed touch (touch-end).
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: Target,
    pub client_x: f64,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, target: Target) -> Self {
        Self {
            kind,
            target,
            client_x: 0.0,
            default_prevented: false,
        }
    }

    /// Set the horizontal coordinate (builder pattern)
    pub fn at(mut self, client_x: f64) -> Self {
        self.client_x = client_x;
        self
    }
}

impl HostEvent for PointerEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
