//! Benchmarks for combo canonicalization and event dispatch
//!
//! Run with: cargo bench dispatch

use std::cell::Cell;
use std::rc::Rc;

use keychime::host::{EventHub, KeyEvent, PointerEvent, PointerKind, Target};
use keychime::keymap::{canonicalize, BindingRegistry, BindingTable, KeySpec};
use keychime::sound::{AudioBackend, InteractionSoundRouter, SoundConfig, Trigger};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn load(&self, _resource: &str, _volume: f32) -> Box<dyn Fn()> {
        Box::new(|| {})
    }
}

// ============================================================================
// Canonicalization
// ============================================================================

#[divan::bench(args = ["s", "ctrl+s", "Shift+Ctrl+Alt+Meta+F5", "cmd+shift+p", "ctrl++"])]
fn canonicalize_text(text: &str) {
    divan::black_box(canonicalize(divan::black_box(text)));
}

#[divan::bench]
fn canonicalize_structured() {
    let spec = KeySpec::new("Enter").ctrl().shift();
    divan::black_box(canonicalize(divan::black_box(spec)));
}

// ============================================================================
// Dispatch
// ============================================================================

fn table_with(bindings: usize, hits: &Rc<Cell<u64>>) -> BindingTable {
    let mut table = BindingTable::new();
    for i in 0..bindings {
        let hits = Rc::clone(hits);
        table.insert(format!("ctrl+k{i}"), move |_| hits.set(hits.get() + 1));
    }
    let hits = Rc::clone(hits);
    table.bind("ctrl+s", move |_| hits.set(hits.get() + 1))
}

#[divan::bench(args = [1, 16, 256])]
fn key_dispatch_hit(bencher: divan::Bencher, bindings: usize) {
    let document = EventHub::new("document");
    let hits = Rc::new(Cell::new(0));
    let _registry = BindingRegistry::new(&document, table_with(bindings, &hits));

    bencher.bench_local(|| {
        let mut event = KeyEvent::down("s").with_ctrl();
        divan::black_box(document.dispatch(&mut event))
    });
}

#[divan::bench(args = [1, 16, 256])]
fn key_dispatch_miss(bencher: divan::Bencher, bindings: usize) {
    let document = EventHub::new("document");
    let hits = Rc::new(Cell::new(0));
    let _registry = BindingRegistry::new(&document, table_with(bindings, &hits));

    bencher.bench_local(|| {
        let mut event = KeyEvent::down("q").with_alt();
        divan::black_box(document.dispatch(&mut event))
    });
}

#[divan::bench]
fn pointer_swipe_gesture(bencher: divan::Bencher) {
    let root = EventHub::new("root");
    let config = SoundConfig::new()
        .with_sound(Trigger::ClickDown, "down")
        .with_sound(Trigger::Swipe, "swipe");
    let _router = InteractionSoundRouter::new(&root, &config, &SilentBackend);

    bencher.bench_local(|| {
        let mut start = PointerEvent::new(PointerKind::TouchStart, Target::new("button")).at(0.0);
        let mut end = PointerEvent::new(PointerKind::TouchEnd, Target::new("button")).at(80.0);
        root.dispatch(&mut start);
        root.dispatch(&mut end);
    });
}
