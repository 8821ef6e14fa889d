//! Interaction-to-sound routing
//!
//! A router wraps one root element. It classifies pointer and touch events
//! on that root into a fixed set of [`Trigger`]s, detects horizontal swipes,
//! and plays the matching pre-gated handle from its [`SoundCatalog`].
//!
//! ```text
//! PointerEvent → SwipeTracker ─┐
//!              → classify() ───┴→ SoundCatalog::play(Trigger)
//! ```

mod catalog;
mod gesture;
mod router;
mod trigger;

pub use catalog::{
    AudioBackend, PlaybackHandle, SoundCatalog, SoundConfig, TracingBackend, DEFAULT_VOLUME,
};
pub use gesture::{SwipeTracker, SWIPE_THRESHOLD};
pub use router::{classify, is_interactive, InteractionSoundRouter, INTERACTIVE_TAGS};
pub use trigger::{Trigger, UnknownTrigger};
