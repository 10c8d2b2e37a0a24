// SPDX-License-Identifier: MPL-2.0
use notification_store::config::{self, Config, StoreSettings};
use notification_store::diagnostics::{
    DiagnosticEventKind, DiagnosticsCollector, RemovalReason,
};
use notification_store::notifications::{
    Kind, Lifecycle, NewNotification, NotificationPatch, Store,
};
use std::collections::HashSet;
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::sleep;

fn store() -> Store {
    Store::new(StoreSettings::default())
}

#[tokio::test]
async fn ids_are_pairwise_distinct() {
    let store = store();
    let ids: Vec<_> = Kind::ALL
        .iter()
        .cycle()
        .take(200)
        .map(|kind| store.add(NewNotification::new(*kind, "x")))
        .collect();

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn iteration_order_equals_call_order() {
    let store = store();
    let ids: Vec<_> = (0..20)
        .map(|i| store.add(NewNotification::info(format!("n{i}"))))
        .collect();

    let order: Vec<_> = store.snapshot().iter().map(|n| n.id()).collect();
    assert_eq!(order, ids);
}

#[tokio::test]
async fn removing_twice_matches_removing_once() {
    let store = store();
    let a = store.add(NewNotification::info("a"));
    let b = store.add(NewNotification::info("b"));

    store.remove(a);
    let once: Vec<_> = store.snapshot().iter().map(|n| n.id()).collect();
    store.remove(a);
    let twice: Vec<_> = store.snapshot().iter().map(|n| n.id()).collect();

    assert_eq!(once, twice);
    assert_eq!(once, vec![b]);
}

#[tokio::test]
async fn update_after_remove_leaves_collection_empty() {
    let store = store();
    let id = store.add(NewNotification::loading("x"));
    store.remove(id);
    store.update(id, NotificationPatch::resolve(Kind::Success, "done"));

    assert!(store.is_empty());
}

#[tokio::test]
async fn loading_and_success_defaults() {
    let store = store();
    let loading = store.get(store.add(NewNotification::loading("x"))).expect("present");
    let success = store.get(store.add(NewNotification::success("x"))).expect("present");

    assert_eq!(loading.duration(), Duration::ZERO);
    assert!(!loading.dismissible());
    assert_eq!(success.duration(), Duration::from_millis(5_000));
    assert!(success.dismissible());
}

#[tokio::test(start_paused = true)]
async fn loading_to_success_auto_removes_after_default_duration() {
    let store = store();
    let id = store.add(NewNotification::loading("x"));
    store.update(id, NotificationPatch::new().kind(Kind::Success));

    sleep(Duration::from_millis(4_990)).await;
    assert!(store.contains(id));

    sleep(Duration::from_millis(20)).await;
    assert!(!store.contains(id));
}

#[tokio::test(start_paused = true)]
async fn clear_all_then_timers_fire_without_resurrecting() {
    let store = store();
    for kind in Kind::ALL {
        store.add(NewNotification::new(kind, "x"));
    }
    store.add(NewNotification::info("short").duration(Duration::from_millis(10)));

    store.clear_all();
    assert!(store.is_empty());

    sleep(Duration::from_secs(30)).await;
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn upload_flow_end_to_end() {
    let mut collector = DiagnosticsCollector::default();
    let store = Store::builder()
        .settings(StoreSettings::default())
        .diagnostics(collector.handle())
        .build();

    let t1 = store.add(
        NewNotification::loading("Procesando archivo")
            .message("Cargando x.xlsx...")
            .dismissible(false)
            .duration(Duration::ZERO),
    );
    assert_eq!(store.lifecycle(t1), Lifecycle::ActiveNoTimer);

    sleep(Duration::from_secs(3)).await;
    store.update(
        t1,
        NotificationPatch::new()
            .kind(Kind::Success)
            .title("Carga completada")
            .message("10 creados, 0 errores")
            .dismissible(true)
            .duration(Duration::from_millis(10_000)),
    );

    let record = store.get(t1).expect("still present");
    assert_eq!(record.kind(), Kind::Success);
    assert!(record.dismissible());
    assert_eq!(record.title(), "Carga completada");
    assert_eq!(record.message(), Some("10 creados, 0 errores"));

    sleep(Duration::from_millis(9_999)).await;
    assert!(store.contains(t1));

    sleep(Duration::from_millis(2)).await;
    assert!(!store.contains(t1));
    assert_eq!(store.lifecycle(t1), Lifecycle::Removed);

    collector.process_pending();
    let last = collector.iter().last().map(|e| e.kind.clone());
    assert_eq!(
        last,
        Some(DiagnosticEventKind::Removed {
            id: t1,
            reason: RemovalReason::Expired
        })
    );
}

#[tokio::test(start_paused = true)]
async fn renderer_subscription_follows_the_flow() {
    let store = store();
    let mut rx = store.subscribe();

    let id = store.add(NewNotification::loading("x"));
    rx.changed().await.expect("store alive");
    assert_eq!(rx.borrow_and_update()[0].kind(), Kind::Loading);

    store.update(id, NotificationPatch::new().kind(Kind::Error));
    rx.changed().await.expect("store alive");
    assert_eq!(rx.borrow_and_update()[0].kind(), Kind::Error);

    // The timer removal reaches subscribers too.
    rx.changed().await.expect("store alive");
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test(start_paused = true)]
async fn configured_duration_drives_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");
    let config = Config {
        default_duration_ms: Some(1_500),
        max_visible: Some(2),
        diagnostics_buffer_capacity: None,
    };
    config::save_to_path(&config, &path).expect("save config");

    let loaded = config::load_from_path(&path).expect("load config");
    let store = Store::new(StoreSettings::from_config(&loaded));

    let id = store.add(NewNotification::warning("Slow network"));
    store.add(NewNotification::loading("a"));
    store.add(NewNotification::loading("b"));
    assert_eq!(store.visible().len(), 2);
    assert_eq!(store.queued_count(), 1);

    sleep(Duration::from_millis(1_501)).await;
    assert!(!store.contains(id));
    assert_eq!(store.len(), 2);
}

#[test]
fn dropping_the_store_stops_its_timers() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");

    runtime.block_on(async {
        let store = store();
        let mut rx = store.subscribe();
        store.add(NewNotification::success("x"));
        let _ = rx.borrow_and_update();
        drop(store);

        sleep(Duration::from_secs(10)).await;
        // The sender died with the store; nothing was published after the drop.
        assert!(rx.changed().await.is_err());
    });
}
