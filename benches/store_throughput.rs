// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for store mutations.
//!
//! Measures the cost of:
//! - Adding persistent notifications (no timer)
//! - The loading → success flip that arms a timer
//! - Removing from the middle of a populated collection

use criterion::{criterion_group, criterion_main, Criterion};
use notification_store::config::StoreSettings;
use notification_store::notifications::{Kind, NewNotification, NotificationPatch, Store};
use std::hint::black_box;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .expect("failed to build runtime")
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let rt = runtime();

    group.bench_function("add_persistent_100", |b| {
        b.iter(|| {
            let store = Store::builder()
                .settings(StoreSettings::default())
                .runtime(rt.handle().clone())
                .build();
            for i in 0..100 {
                black_box(store.add(NewNotification::info(format!("n{i}")).persistent()));
            }
        });
    });

    group.finish();
}

fn bench_loading_to_success(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let rt = runtime();
    let store = Store::builder().runtime(rt.handle().clone()).build();

    group.bench_function("loading_to_success", |b| {
        b.iter(|| {
            let id = store.add(NewNotification::loading("Uploading"));
            store.update(id, NotificationPatch::resolve(Kind::Success, "Done"));
            store.remove(black_box(id));
        });
    });

    group.finish();
}

fn bench_remove_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let rt = runtime();
    let store = Store::builder().runtime(rt.handle().clone()).build();
    for i in 0..200 {
        store.add(NewNotification::info(format!("n{i}")).persistent());
    }

    group.bench_function("remove_middle_of_200", |b| {
        b.iter(|| {
            let id = store.add(NewNotification::info("probe").persistent());
            black_box(store.remove(id));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_loading_to_success,
    bench_remove_middle
);
criterion_main!(benches);
