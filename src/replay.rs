//! Scripted event replay
//!
//! Feeds a YAML list of host events through a document hub (keys) and a root
//! hub (pointers) that carry a [`BindingRegistry`], a [`PressedKeys`] tracker
//! and an [`InteractionSoundRouter`], and reports what happened.
//!
//! ```yaml
//! - { type: keydown, key: x, ctrl: true }
//! - { type: keyup, key: x }
//! - { type: touchstart, tag: button, x: 10 }
//! - { type: touchend, tag: button, x: 90 }
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, ConfigError};
use crate::host::{EventHub, KeyEvent, KeyEventKind, PointerEvent, PointerKind, Target};
use crate::keymap::{BindingRegistry, BindingTable, KeyCombo, PressedKeys};
use crate::sound::{AudioBackend, InteractionSoundRouter};

/// Key fields of a scripted key event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFields {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

/// Target and coordinate of a scripted pointer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerFields {
    pub tag: String,
    pub checked: bool,
    pub x: f64,
}

impl Default for PointerFields {
    fn default() -> Self {
        Self {
            tag: "button".to_string(),
            checked: false,
            x: 0.0,
        }
    }
}

/// One entry of an event script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    KeyDown(KeyFields),
    KeyUp(KeyFields),
    Click(PointerFields),
    MouseDown(PointerFields),
    MouseUp(PointerFields),
    MouseEnter(PointerFields),
    TouchStart(PointerFields),
    TouchEnd(PointerFields),
}

/// A script event converted into the host event it stands for
#[derive(Debug, Clone, PartialEq)]
pub enum HostInput {
    Key(KeyEvent),
    Pointer(PointerEvent),
}

impl ScriptEvent {
    pub fn into_host(self) -> HostInput {
        let key = |kind, f: KeyFields| {
            HostInput::Key(KeyEvent::new(kind, f.key).with_modifiers(f.ctrl, f.alt, f.shift, f.meta))
        };
        let pointer = |kind, f: PointerFields| {
            let target = Target {
                tag: f.tag,
                checked: f.checked,
            };
            HostInput::Pointer(PointerEvent::new(kind, target).at(f.x))
        };

        match self {
            ScriptEvent::KeyDown(f) => key(KeyEventKind::Down, f),
            ScriptEvent::KeyUp(f) => key(KeyEventKind::Up, f),
            ScriptEvent::Click(f) => pointer(PointerKind::Click, f),
            ScriptEvent::MouseDown(f) => pointer(PointerKind::MouseDown, f),
            ScriptEvent::MouseUp(f) => pointer(PointerKind::MouseUp, f),
            ScriptEvent::MouseEnter(f) => pointer(PointerKind::MouseEnter, f),
            ScriptEvent::TouchStart(f) => pointer(PointerKind::TouchStart, f),
            ScriptEvent::TouchEnd(f) => pointer(PointerKind::TouchEnd, f),
        }
    }
}

/// Load an event script from a YAML file
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    parse_script(&content)
}

/// Parse an event script from a YAML string
pub fn parse_script(yaml: &str) -> Result<Vec<ScriptEvent>, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// What a replay observed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Number of events replayed
    pub events: usize,
    /// Actions of the bindings that fired, in order
    pub actions: Vec<String>,
    /// Canonical combos whose default behavior was prevented
    pub prevented: Vec<String>,
    /// Sound resources played, in order
    pub sounds: Vec<String>,
    /// Keys still held when the script ended
    pub held_keys: Vec<String>,
}

#[derive(Debug, Default)]
struct ReplayLog {
    actions: Vec<String>,
    sounds: Vec<String>,
}

/// Backend wrapper that records every play before delegating
struct RecordingBackend<'a> {
    inner: &'a dyn AudioBackend,
    log: Rc<RefCell<ReplayLog>>,
}

impl AudioBackend for RecordingBackend<'_> {
    fn load(&self, resource: &str, volume: f32) -> Box<dyn Fn()> {
        let play = self.inner.load(resource, volume);
        let log = Rc::clone(&self.log);
        let resource = resource.to_string();
        Box::new(move || {
            play();
            log.borrow_mut().sounds.push(resource.clone());
        })
    }
}

/// A mounted registry, key tracker and router sharing one pair of hubs
pub struct ReplaySession {
    document: EventHub<KeyEvent>,
    root: EventHub<PointerEvent>,
    registry: BindingRegistry,
    pressed: PressedKeys,
    _router: InteractionSoundRouter,
    log: Rc<RefCell<ReplayLog>>,
}

impl ReplaySession {
    /// Mount everything `config` describes; sounds load through `backend`
    pub fn new(config: &AppConfig, backend: &dyn AudioBackend) -> Result<Self, ConfigError> {
        let log = Rc::new(RefCell::new(ReplayLog::default()));
        let document = EventHub::new("document");
        let root = EventHub::new("root");

        let bindings = action_table(config, &log)?;
        let registry = BindingRegistry::new(&document, bindings);
        let pressed = PressedKeys::new(&document);

        let recording = RecordingBackend {
            inner: backend,
            log: Rc::clone(&log),
        };
        let router = InteractionSoundRouter::new(&root, &config.sounds, &recording);

        Ok(Self {
            document,
            root,
            registry,
            pressed,
            _router: router,
            log,
        })
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Swap in the bindings of another config, discarding the current ones
    pub fn rebind(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.registry.replace(action_table(config, &self.log)?);
        Ok(())
    }

    /// Dispatch every event in order and report the outcome
    pub fn run(&self, events: impl IntoIterator<Item = ScriptEvent>) -> ReplayReport {
        let mut report = ReplayReport::default();

        for event in events {
            report.events += 1;
            match event.into_host() {
                HostInput::Key(mut event) => {
                    if self.document.dispatch(&mut event) {
                        report
                            .prevented
                            .push(KeyCombo::from_event(&event).into_string());
                    }
                }
                HostInput::Pointer(mut event) => {
                    self.root.dispatch(&mut event);
                }
            }
        }

        let mut log = self.log.borrow_mut();
        report.actions = std::mem::take(&mut log.actions);
        report.sounds = std::mem::take(&mut log.sounds);
        report.held_keys = self.pressed.snapshot();
        report
    }
}

/// Build a table whose handlers record their action name
fn action_table(
    config: &AppConfig,
    log: &Rc<RefCell<ReplayLog>>,
) -> Result<BindingTable, ConfigError> {
    let mut table = BindingTable::new();
    for (combo, action) in config.binding_actions()? {
        let log = Rc::clone(log);
        let fired = combo.clone();
        table.insert_handler(
            combo,
            Rc::new(move |_event: &KeyEvent| {
                tracing::info!(combo = %fired, action = %action, "binding fired");
                log.borrow_mut().actions.push(action.clone());
            }),
        );
    }
    Ok(table)
}
