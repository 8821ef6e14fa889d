//! Keybinding normalization and dispatch
//!
//! This module provides:
//! - Canonical combo identity that ignores order, case and representation
//! - Binding tables keyed by canonical combo
//! - A registry that owns the active table and a document-scope key listener
//! - A held-key tracker
//!
//! # Architecture
//!
//! ```text
//! KeyEvent → KeyCombo::from_event() → active BindingTable → Handler(&KeyEvent)
//! ```
//!
//! # Registering
//!
//! ```ignore
//! let document = EventHub::new("document");
//! let registry = BindingRegistry::new(&document, BindingTable::new().bind("ctrl+s", save));
//! let replace = registry.register(BindingTable::new().bind("ctrl+x", toast));
//! ```

mod binding;
mod parse;
mod pressed;
mod registry;
mod types;

pub use binding::{BindingTable, Handler};
pub use parse::{canonicalize, KeymapError};
pub use pressed::PressedKeys;
pub use registry::{BindingRegistry, KeyAction, Replacer};
pub use types::{ComboDescriptor, KeyCombo, KeySpec, Modifiers};
