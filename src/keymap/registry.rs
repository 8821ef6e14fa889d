//! BindingRegistry: owns the active binding table and its key listener

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{EventHub, HostEvent, KeyEvent, Subscription};

use super::binding::BindingTable;
use super::types::KeyCombo;

/// Slot holding the active table; swapped wholesale, never edited in place
type ActiveTable = RefCell<Rc<BindingTable>>;

/// Result of offering a key event to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A handler ran and the default behavior was prevented
    Dispatched(KeyCombo),
    /// No binding matches; default behavior proceeds
    NoMatch(KeyCombo),
    /// Not a key-down event
    Ignored,
}

/// Keybinding registry attached to a document-scope hub
///
/// The key listener is attached in [`BindingRegistry::new`] and detached
/// when the registry is dropped.
pub struct BindingRegistry {
    active: Rc<ActiveTable>,
    _subscription: Subscription,
}

impl BindingRegistry {
    /// Install `bindings` and start listening on `hub`
    pub fn new(hub: &EventHub<KeyEvent>, bindings: BindingTable) -> Self {
        tracing::debug!(hub = hub.label(), bindings = bindings.len(), "binding registry mounted");
        let active: Rc<ActiveTable> = Rc::new(RefCell::new(Rc::new(bindings)));

        let listener_table = Rc::clone(&active);
        let subscription = hub.subscribe(move |event: &mut KeyEvent| {
            handle_key_event(&listener_table, event);
        });

        Self {
            active,
            _subscription: subscription,
        }
    }

    /// Install `bindings` as the active table, discarding the previous one
    ///
    /// Returns a [`Replacer`] for later updates.
    pub fn register(&self, bindings: BindingTable) -> Replacer {
        install(&self.active, bindings);
        self.replacer()
    }

    /// Same contract as [`BindingRegistry::register`]
    pub fn replace(&self, bindings: BindingTable) {
        install(&self.active, bindings);
    }

    /// Handle that can replace this registry's table from elsewhere
    pub fn replacer(&self) -> Replacer {
        Replacer {
            active: Rc::downgrade(&self.active),
        }
    }

    /// Combos in the currently active table
    pub fn active_combos(&self) -> Vec<KeyCombo> {
        self.active.borrow().combos()
    }

    /// Check if a combo is bound in the active table
    pub fn is_bound(&self, combo: &KeyCombo) -> bool {
        self.active.borrow().contains(combo)
    }

    /// Offer an event directly, bypassing the hub; returns what happened
    pub fn handle(&self, event: &mut KeyEvent) -> KeyAction {
        handle_key_event(&self.active, event)
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("active", &self.active.borrow())
            .finish()
    }
}

/// Replace function handed back by [`BindingRegistry::register`]
///
/// Holds no ownership; once the registry is dropped, replacing is a no-op.
#[derive(Clone)]
pub struct Replacer {
    active: Weak<ActiveTable>,
}

impl Replacer {
    pub fn replace(&self, bindings: BindingTable) {
        match self.active.upgrade() {
            Some(active) => install(&active, bindings),
            None => tracing::debug!("replace called after registry was dropped"),
        }
    }

    /// Whether the owning registry is still mounted
    pub fn is_live(&self) -> bool {
        self.active.strong_count() > 0
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replacer")
            .field("live", &self.is_live())
            .finish()
    }
}

fn install(active: &ActiveTable, bindings: BindingTable) {
    tracing::debug!(bindings = bindings.len(), combos = ?bindings.combos(), "binding table installed");
    *active.borrow_mut() = Rc::new(bindings);
}

/// Look up the event's combo and run its handler
///
/// The table borrow is released before the handler runs, so a handler may
/// replace bindings; the new table applies from the next event.
fn handle_key_event(active: &ActiveTable, event: &mut KeyEvent) -> KeyAction {
    if !event.is_down() {
        return KeyAction::Ignored;
    }

    let combo = KeyCombo::from_event(event);
    let handler = {
        let table = active.borrow();
        table.get(&combo).cloned()
    };

    match handler {
        Some(handler) => {
            tracing::trace!(%combo, "dispatching binding");
            event.prevent_default();
            handler(event);
            KeyAction::Dispatched(combo)
        }
        None => {
            tracing::trace!(%combo, "no binding");
            KeyAction::NoMatch(combo)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn table_with_counter(combo: &str, counter: &Rc<Cell<u32>>) -> BindingTable {
        let counter = Rc::clone(counter);
        BindingTable::new().bind(combo, move |_| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_handle_key_event_outcomes() {
        let hits = Rc::new(Cell::new(0));
        let active: ActiveTable = RefCell::new(Rc::new(table_with_counter("ctrl+s", &hits)));

        let mut event = KeyEvent::down("s").with_ctrl();
        assert_eq!(
            handle_key_event(&active, &mut event),
            KeyAction::Dispatched(KeyCombo::parse("ctrl+s").unwrap())
        );
        assert!(event.default_prevented());

        let mut event = KeyEvent::down("s");
        assert!(matches!(
            handle_key_event(&active, &mut event),
            KeyAction::NoMatch(_)
        ));
        assert!(!event.default_prevented());

        let mut event = KeyEvent::up("s").with_ctrl();
        assert_eq!(handle_key_event(&active, &mut event), KeyAction::Ignored);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_registry_drop_detaches_listener() {
        let hub = EventHub::new("document");
        let hits = Rc::new(Cell::new(0));
        let registry = BindingRegistry::new(&hub, table_with_counter("a", &hits));
        assert_eq!(hub.listener_count(), 1);

        drop(registry);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&mut KeyEvent::down("a"));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_replacer_goes_dead_with_registry() {
        let hub = EventHub::new("document");
        let registry = BindingRegistry::new(&hub, BindingTable::new());
        let replacer = registry.replacer();
        assert!(replacer.is_live());

        drop(registry);
        assert!(!replacer.is_live());
        replacer.replace(BindingTable::new().bind("a", |_| {}));
    }

    #[test]
    fn test_handler_can_replace_reentrantly() {
        let hub = EventHub::new("document");
        let registry = BindingRegistry::new(&hub, BindingTable::new());
        let replacer = registry.replacer();

        let second_hits = Rc::new(Cell::new(0));
        let next = table_with_counter("b", &second_hits);
        registry.replace(BindingTable::new().bind("a", move |_| replacer.replace(next.clone())));

        assert!(hub.dispatch(&mut KeyEvent::down("a")));
        assert!(!registry.is_bound(&KeyCombo::parse("a").unwrap()));

        hub.dispatch(&mut KeyEvent::down("b"));
        assert_eq!(second_hits.get(), 1);
    }
}
