//! Binding tables: canonical combo → handler

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::host::KeyEvent;

use super::parse::canonicalize;
use super::types::{ComboDescriptor, KeyCombo};

/// A bound handler; receives the original triggering event
pub type Handler = Rc<dyn Fn(&KeyEvent)>;

/// A set of bindings keyed by canonical combo
///
/// Keys are unique: binding a descriptor whose canonical form is already
/// present replaces the earlier handler.
#[derive(Clone, Default)]
pub struct BindingTable {
    entries: HashMap<KeyCombo, Handler>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding (builder pattern)
    pub fn bind(
        mut self,
        combo: impl Into<ComboDescriptor>,
        handler: impl Fn(&KeyEvent) + 'static,
    ) -> Self {
        self.insert(combo, handler);
        self
    }

    /// Insert a binding, returning the handler it displaced
    pub fn insert(
        &mut self,
        combo: impl Into<ComboDescriptor>,
        handler: impl Fn(&KeyEvent) + 'static,
    ) -> Option<Handler> {
        self.insert_handler(canonicalize(combo), Rc::new(handler))
    }

    /// Insert an already-canonical binding
    pub fn insert_handler(&mut self, combo: KeyCombo, handler: Handler) -> Option<Handler> {
        let displaced = self.entries.insert(combo.clone(), handler);
        if displaced.is_some() {
            tracing::debug!(%combo, "binding replaced an earlier entry with the same combo");
        }
        displaced
    }

    pub fn get(&self, combo: &KeyCombo) -> Option<&Handler> {
        self.entries.get(combo)
    }

    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.entries.contains_key(combo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All bound combos, sorted
    pub fn combos(&self) -> Vec<KeyCombo> {
        let mut combos: Vec<KeyCombo> = self.entries.keys().cloned().collect();
        combos.sort();
        combos
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("combos", &self.combos())
            .finish()
    }
}
