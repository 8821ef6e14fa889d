//! Tracks which keys are currently held down

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{EventHub, KeyEvent, KeyEventKind, Subscription};

/// Held-key tracker attached to a document-scope hub
///
/// Keys are kept as reported by the host, in press order, without duplicates.
pub struct PressedKeys {
    keys: Rc<RefCell<Vec<String>>>,
    _subscription: Subscription,
}

impl PressedKeys {
    pub fn new(hub: &EventHub<KeyEvent>) -> Self {
        let keys = Rc::new(RefCell::new(Vec::new()));
        let listener_keys = Rc::clone(&keys);
        let subscription = hub.subscribe(move |event: &mut KeyEvent| {
            track(&mut listener_keys.borrow_mut(), event);
        });

        Self {
            keys,
            _subscription: subscription,
        }
    }

    /// Keys held right now
    pub fn snapshot(&self) -> Vec<String> {
        self.keys.borrow().clone()
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.borrow().iter().any(|k| k == key)
    }
}

fn track(keys: &mut Vec<String>, event: &KeyEvent) {
    match event.kind {
        KeyEventKind::Down => {
            if !keys.iter().any(|k| *k == event.key) {
                keys.push(event.key.clone());
            }
        }
        KeyEventKind::Up => keys.retain(|k| *k != event.key),
    }
}
