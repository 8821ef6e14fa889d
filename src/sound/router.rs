//! InteractionSoundRouter: pointer/touch events on one root → sound triggers

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::host::{EventHub, PointerEvent, PointerKind, Subscription, Target};

use super::catalog::{AudioBackend, SoundCatalog, SoundConfig};
use super::gesture::SwipeTracker;
use super::trigger::Trigger;

/// Element tags that produce interaction sounds
pub const INTERACTIVE_TAGS: [&str; 3] = ["BUTTON", "A", "INPUT"];

/// Check the target's tag against [`INTERACTIVE_TAGS`], ignoring case
pub fn is_interactive(target: &Target) -> bool {
    INTERACTIVE_TAGS
        .iter()
        .any(|tag| target.tag.eq_ignore_ascii_case(tag))
}

/// Map an event type and target to the trigger it fires
///
/// Swipes are not classified here; see [`SwipeTracker`].
pub fn classify(kind: PointerKind, target: &Target) -> Option<Trigger> {
    if !is_interactive(target) {
        return None;
    }
    let trigger = match kind {
        PointerKind::Click => Trigger::Click,
        PointerKind::MouseDown | PointerKind::TouchStart => Trigger::ClickDown,
        PointerKind::MouseUp | PointerKind::TouchEnd => {
            if target.checked {
                Trigger::ClickOn
            } else {
                Trigger::ClickOff
            }
        }
        PointerKind::MouseEnter => Trigger::Hover,
    };
    Some(trigger)
}

struct RouterState {
    catalog: SoundCatalog,
    swipe: Cell<SwipeTracker>,
    disabled: bool,
}

impl RouterState {
    /// Run swipe detection, then classification, for one event
    fn route(&self, event: &PointerEvent) -> Vec<Trigger> {
        let mut played = Vec::new();
        if self.disabled {
            return played;
        }

        let mut swipe = self.swipe.get();
        match event.kind {
            PointerKind::TouchStart => swipe.touch_start(event.client_x),
            PointerKind::TouchEnd => {
                if swipe.touch_end(event.client_x) && self.catalog.play(Trigger::Swipe) {
                    played.push(Trigger::Swipe);
                }
            }
            _ => {}
        }
        self.swipe.set(swipe);

        if let Some(trigger) = classify(event.kind, &event.target) {
            tracing::trace!(kind = ?event.kind, tag = %event.target.tag, %trigger, "classified");
            if self.catalog.play(trigger) {
                played.push(trigger);
            }
        }
        played
    }
}

/// Sound router scoped to one root element
///
/// Listens on the root hub from construction until drop.
pub struct InteractionSoundRouter {
    state: Rc<RouterState>,
    _subscription: Subscription,
}

impl InteractionSoundRouter {
    /// Preload `config`'s sounds through `backend` and attach to `root`
    pub fn new(
        root: &EventHub<PointerEvent>,
        config: &SoundConfig,
        backend: &dyn AudioBackend,
    ) -> Self {
        let state = Rc::new(RouterState {
            catalog: SoundCatalog::load(config, backend),
            swipe: Cell::new(SwipeTracker::new()),
            disabled: config.disabled,
        });
        tracing::debug!(
            root = root.label(),
            disabled = config.disabled,
            sounds = config.sounds.len(),
            "sound router mounted"
        );

        let listener_state = Rc::clone(&state);
        let subscription = root.subscribe(move |event: &mut PointerEvent| {
            listener_state.route(event);
        });

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Whether a trigger will play when fired
    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        !self.state.disabled && self.state.catalog.is_enabled(trigger)
    }

    /// Whether a touch has started and not yet ended
    pub fn is_tracking_swipe(&self) -> bool {
        self.state.swipe.get().is_tracking()
    }

    /// Route an event directly, bypassing the hub; returns what played
    pub fn route(&self, event: &PointerEvent) -> Vec<Trigger> {
        self.state.route(event)
    }
}

impl fmt::Debug for InteractionSoundRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionSoundRouter")
            .field("catalog", &self.state.catalog)
            .field("disabled", &self.state.disabled)
            .finish()
    }
}
