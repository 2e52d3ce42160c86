use atomise::{AtomicCounter, AtomicFlag, AtomicRef, Event};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn counter_increment(c: &mut Criterion) {
    let counter = AtomicCounter::new(0);

    c.bench_function("counter_increment", |b| b.iter(|| counter.increment()));
}

fn flag_toggle(c: &mut Criterion) {
    let flag = AtomicFlag::new(false);

    c.bench_function("flag_toggle", |b| {
        b.iter(|| {
            flag.make_true();
            flag.make_false()
        })
    });
}

fn cell_get(c: &mut Criterion) {
    let cell = AtomicRef::new(Arc::new(0_u64));

    c.bench_function("cell_get", |b| b.iter(|| cell.get()));
}

fn cell_get_and_set(c: &mut Criterion) {
    let cell = AtomicRef::new(Arc::new(0_u64));
    let replacement = Arc::new(1_u64);

    c.bench_function("cell_get_and_set", |b| {
        b.iter(|| cell.get_and_set(replacement.clone()))
    });
}

fn event_set_reset(c: &mut Criterion) {
    let event = Event::new();

    c.bench_function("event_set_reset", |b| {
        b.iter(|| {
            event.set();
            event.reset();
        })
    });
}

criterion_group!(
    benches,
    counter_increment,
    flag_toggle,
    cell_get,
    cell_get_and_set,
    event_set_reset
);
criterion_main!(benches);
