use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::Once;

use hotkeyr::{Key, KeyPress, ShortcutDispatcher, ShortcutHandler};

static INIT: Once = Once::new();

fn init_tracing_once() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .try_init();
    });
}

/// Populate a dispatcher the way a mind-map host does: a few dozen
/// bindings, most with a Control modifier, a couple of multi-alias specs.
fn populated_dispatcher() -> ShortcutDispatcher {
    let mut dispatcher = ShortcutDispatcher::default();
    let noop: ShortcutHandler = Arc::new(|| {});

    for spec in [
        "Enter",
        "Tab | Insert",
        "Del | Backspace",
        "Up",
        "Down",
        "Left",
        "Right",
        "Control+c",
        "Control+x",
        "Control+v",
        "Control+z",
        "Control+y",
        "Control+a",
        "Control+s",
        "Control+g",
        "Control+e",
        "Control+l",
        "Control+i",
        "Control+u",
        "Control+Enter",
        "Control+Shift+z",
        "Shift+Tab",
        "Control+=",
        "Control+-",
    ] {
        dispatcher
            .register(spec, Arc::clone(&noop))
            .expect("bench specs are valid");
    }

    dispatcher
}

fn bench_dispatch(c: &mut Criterion) {
    init_tracing_once();

    let mut group = c.benchmark_group("dispatch");

    let mut dispatcher = populated_dispatcher();
    let matched = KeyPress::new(Key::Z).with_ctrl().with_shift();
    let unmatched = KeyPress::new(Key::Q).with_ctrl().with_alt();
    let plain = KeyPress::new(Key::Enter);

    group.bench_function("matched_modifier_combo", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&matched))))
    });

    group.bench_function("matched_plain_key", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&plain))))
    });

    group.bench_function("unmatched_press", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&unmatched))))
    });

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    init_tracing_once();

    c.bench_function("register_multi_alias_spec", |b| {
        let noop: ShortcutHandler = Arc::new(|| {});
        b.iter(|| {
            let mut dispatcher = ShortcutDispatcher::default();
            dispatcher
                .register(black_box("Tab | Insert"), Arc::clone(&noop))
                .expect("valid spec");
            black_box(dispatcher)
        })
    });
}

criterion_group!(benches, bench_dispatch, bench_registration);
criterion_main!(benches);
