//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use keychime::host::{EventHub, KeyEvent, PointerEvent, PointerKind, Target};
use keychime::sound::AudioBackend;

/// Audio backend that records loads and plays instead of producing sound
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub loads: Rc<RefCell<Vec<(String, f32)>>>,
    pub plays: Rc<RefCell<Vec<String>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resources played so far, in order
    pub fn played(&self) -> Vec<String> {
        self.plays.borrow().clone()
    }

    /// How many times a resource has played
    pub fn count(&self, resource: &str) -> usize {
        self.plays.borrow().iter().filter(|r| *r == resource).count()
    }
}

impl AudioBackend for RecordingBackend {
    fn load(&self, resource: &str, volume: f32) -> Box<dyn Fn()> {
        self.loads.borrow_mut().push((resource.to_string(), volume));
        let plays = Rc::clone(&self.plays);
        let resource = resource.to_string();
        Box::new(move || plays.borrow_mut().push(resource.clone()))
    }
}

/// Fresh document-scope hub for key events
pub fn document() -> EventHub<KeyEvent> {
    EventHub::new("document")
}

/// Fresh root-element hub for pointer events
pub fn root() -> EventHub<PointerEvent> {
    EventHub::new("root")
}

/// Dispatch a pointer event of `kind` on a `tag` element at `x`
pub fn pointer(hub: &EventHub<PointerEvent>, kind: PointerKind, tag: &str, x: f64) {
    hub.dispatch(&mut PointerEvent::new(kind, Target::new(tag)).at(x));
}

/// Dispatch a full touch gesture on a `tag` element from `from` to `to`
pub fn touch(hub: &EventHub<PointerEvent>, tag: &str, from: f64, to: f64) {
    pointer(hub, PointerKind::TouchStart, tag, from);
    pointer(hub, PointerKind::TouchEnd, tag, to);
}
