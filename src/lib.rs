//! keychime - keybinding dispatch and interaction sounds
//!
//! This crate provides two leaf components for an event-driven host:
//! a keybinding registry that canonicalizes combos and dispatches key
//! events to handlers, and a sound router that turns pointer/touch events
//! on one root element into semantic sound triggers.

pub mod config;
pub mod config_paths;
pub mod host;
pub mod keymap;
pub mod replay;
pub mod sound;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use host::{EventHub, KeyEvent, PointerEvent};
pub use keymap::{canonicalize, BindingRegistry, BindingTable, KeyCombo};
pub use sound::{InteractionSoundRouter, SoundConfig, Trigger};
