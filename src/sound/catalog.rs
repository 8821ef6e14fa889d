//! Sound configuration, the audio backend seam, and gated playback handles

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::trigger::Trigger;

/// Volume used when none is configured
pub const DEFAULT_VOLUME: f32 = 0.25;

/// Which resource plays for each trigger, and how loud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Trigger → resource identifier; empty identifiers count as unconfigured
    pub sounds: BTreeMap<Trigger, String>,
    /// Playback volume in [0, 1]
    pub volume: f32,
    /// Silences every trigger
    pub disabled: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            sounds: BTreeMap::new(),
            volume: DEFAULT_VOLUME,
            disabled: false,
        }
    }
}

impl SoundConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a resource for a trigger (builder pattern)
    pub fn with_sound(mut self, trigger: Trigger, resource: impl Into<String>) -> Self {
        self.sounds.insert(trigger, resource.into());
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Resource for a trigger, or "" when unconfigured
    pub fn resource(&self, trigger: Trigger) -> &str {
        self.sounds.get(&trigger).map(String::as_str).unwrap_or("")
    }

    /// Whether a trigger will actually play
    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        !self.disabled && !self.resource(trigger).is_empty()
    }

    /// Volume clamped into [0, 1]; NaN falls back to the default
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_nan() {
            tracing::warn!("sound volume is NaN, using {}", DEFAULT_VOLUME);
            return DEFAULT_VOLUME;
        }
        let clamped = self.volume.clamp(0.0, 1.0);
        if clamped != self.volume {
            tracing::warn!(volume = self.volume, clamped, "sound volume out of range");
        }
        clamped
    }
}

/// Audio playback capability provided by the host
///
/// `load` preloads a resource at a fixed volume and returns a zero-argument
/// function that plays it.
pub trait AudioBackend {
    fn load(&self, resource: &str, volume: f32) -> Box<dyn Fn()>;
}

/// Backend that logs each play instead of producing audio
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl AudioBackend for TracingBackend {
    fn load(&self, resource: &str, volume: f32) -> Box<dyn Fn()> {
        tracing::debug!(resource, volume, "sound loaded");
        let resource = resource.to_string();
        Box::new(move || tracing::info!(resource = %resource, volume, "play sound"))
    }
}

/// Playback handle for one trigger; gated by its enabled flag
pub struct PlaybackHandle {
    trigger: Trigger,
    enabled: bool,
    play: Option<Box<dyn Fn()>>,
}

impl PlaybackHandle {
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Play if enabled; returns whether anything played
    pub fn play(&self) -> bool {
        match (&self.play, self.enabled) {
            (Some(play), true) => {
                play();
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("trigger", &self.trigger)
            .field("enabled", &self.enabled)
            .field("loaded", &self.play.is_some())
            .finish()
    }
}

/// One playback handle per trigger, indexed by [`Trigger::index`]
#[derive(Debug)]
pub struct SoundCatalog {
    handles: [PlaybackHandle; 6],
}

impl SoundCatalog {
    /// Preload every configured resource through `backend`
    ///
    /// Enabled flags are fixed here: a handle is enabled only when its
    /// resource is non-empty and the config is not disabled.
    pub fn load(config: &SoundConfig, backend: &dyn AudioBackend) -> Self {
        let volume = config.effective_volume();
        let handles = Trigger::ALL.map(|trigger| {
            let resource = config.resource(trigger);
            let play = (!resource.is_empty()).then(|| backend.load(resource, volume));
            PlaybackHandle {
                trigger,
                enabled: config.is_enabled(trigger),
                play,
            }
        });
        Self { handles }
    }

    pub fn handle(&self, trigger: Trigger) -> &PlaybackHandle {
        &self.handles[trigger.index()]
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        self.handle(trigger).is_enabled()
    }

    /// Play a trigger's sound; unconfigured or disabled triggers are no-ops
    pub fn play(&self, trigger: Trigger) -> bool {
        let played = self.handle(trigger).play();
        if !played {
            tracing::trace!(%trigger, "sound trigger is disabled");
        }
        played
    }
}
