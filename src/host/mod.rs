//! Host environment model: event targets and the events they deliver
//!
//! The core components never reach for a global event source. Instead they
//! receive an [`EventHub`] (the document scope for keys, one root element for
//! pointers) and own a [`Subscription`] that detaches on drop.
//!
//! ```text
//! host input → EventHub::dispatch() → listeners (registry, router, ...) → handlers
//! ```

mod events;
mod hub;

pub use events::{HostEvent, KeyEvent, KeyEventKind, PointerEvent, PointerKind, Target};
pub use hub::{EventHub, Subscription};
