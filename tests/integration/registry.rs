use std::sync::Arc;
use std::thread;

use blueprint_console::engine::{EventKind, ModuleId, StaticContainer, StaticRecipe};
use blueprint_console::registry::{ContainerDiscovery, LifecycleListener, ModuleState};
use blueprint_console::test_utils::{event, module, sample_container};

use crate::common::Harness;

#[test]
fn test_waiting_event_snapshots_discovered_container() {
    let h = Harness::new();
    let m1 = module(1, "m1", "1.0.0");

    h.tracker.on_discovered(ModuleId(1), sample_container("R1"));
    h.listener.on_event(event(EventKind::Waiting, m1, 100).with_dependencies(["dep.Foo"]));

    let snapshots = h.registry.snapshot_all();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.recipes().len(), 3);
    assert_eq!(snapshot.unsatisfied_count(), 1);
    assert_eq!(snapshot.missing_dependencies_string(), "[dep.Foo]");
    assert_eq!(snapshot.event_type_name().unwrap(), "Waiting");
}

#[test]
fn test_destroyed_event_evicts_module() {
    let h = Harness::new();
    let m1 = module(1, "m1", "1.0.0");

    h.tracker.on_discovered(ModuleId(1), sample_container("R1"));
    h.listener.on_event(event(EventKind::Created, m1.clone(), 1));
    h.listener.on_event(event(EventKind::Destroyed, m1, 2));

    assert!(h.registry.snapshot_all().is_empty());
    assert_eq!(h.registry.state(ModuleId(1)), ModuleState::Absent);
}

#[test]
fn test_destroyed_event_evicts_despite_stale_discovery() {
    let h = Harness::new();
    let m1 = module(1, "m1", "1.0.0");
    let m2 = module(2, "m2", "1.0.0");

    h.tracker.on_discovered(ModuleId(1), sample_container("R1"));
    h.tracker.on_discovered(ModuleId(2), sample_container("R2"));
    h.listener.on_event(event(EventKind::Created, m1.clone(), 1));
    h.listener.on_event(event(EventKind::Created, m2, 1));

    h.listener.on_event(event(EventKind::Destroyed, m1, 2));
    // Stale add delivered after the destroy
    h.tracker.on_discovered(ModuleId(1), sample_container("R1"));

    let ids: Vec<_> = h.registry.snapshot_all().iter().map(|s| s.module_id()).collect();
    assert_eq!(ids, [ModuleId(2)]);
}

#[test]
fn test_event_without_reference_is_empty_snapshot() {
    let h = Harness::new();
    h.listener.on_event(event(EventKind::Creating, module(5, "m5", "1.0.0"), 1));

    let snapshot = h.registry.get(ModuleId(5)).unwrap();
    assert!(snapshot.recipes().is_empty());
    assert_eq!(snapshot.unsatisfied_count(), 0);
}

#[test]
fn test_lost_reference_keeps_snapshot_until_next_event() {
    let h = Harness::new();
    let m1 = module(1, "m1", "1.0.0");

    h.tracker.on_discovered(ModuleId(1), sample_container("R1"));
    h.listener.on_event(event(EventKind::Created, m1.clone(), 1));
    h.tracker.on_lost(ModuleId(1));

    assert_eq!(h.registry.get(ModuleId(1)).unwrap().recipes().len(), 3);

    h.listener.on_event(event(EventKind::Destroying, m1, 2));
    let snapshot = h.registry.get(ModuleId(1)).unwrap();
    assert_eq!(snapshot.event_kind(), EventKind::Destroying);
    assert!(snapshot.recipes().is_empty());
}

#[test]
fn test_container_without_repository_is_dropped() {
    let h = Harness::new();
    h.tracker.on_discovered(ModuleId(1), Arc::new(StaticContainer::opaque("proxy")));
    h.listener.on_event(event(EventKind::Created, module(1, "m1", "1.0.0"), 1));

    assert!(h.registry.is_empty());
    assert_eq!(h.registry.state(ModuleId(1)), ModuleState::Discovered);
}

#[test]
fn test_snapshot_all_is_idempotent() {
    let h = Harness::new();
    for id in 0..20u64 {
        h.tracker.on_discovered(ModuleId(id), sample_container("c"));
        h.listener.on_event(event(
            EventKind::Created,
            module(id, &format!("module.{}", id % 3), "1.0.0"),
            (id % 4) as i64,
        ));
    }

    let first: Vec<_> = h.registry.snapshot_all().iter().map(|s| s.module_id()).collect();
    let second: Vec<_> = h.registry.snapshot_all().iter().map(|s| s.module_id()).collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_writers_and_readers() {
    let h = Harness::new();
    let tracker = h.tracker.clone();
    let listener = h.listener.clone();

    let writers: Vec<_> = (0..8u64)
        .map(|t| {
            let tracker = tracker.clone();
            let listener = listener.clone();
            thread::spawn(move || {
                for i in 0..50u64 {
                    let id = t * 100 + i;
                    tracker.on_discovered(
                        ModuleId(id),
                        Arc::new(StaticContainer::new(
                            "c",
                            [StaticRecipe::satisfiable("r", i % 2 == 0, None)],
                        )),
                    );
                    let info = module(id, &format!("m{id}"), "1.0.0");
                    listener.on_event(event(EventKind::Creating, info.clone(), i as i64));
                    listener.on_event(event(EventKind::Created, info.clone(), i as i64 + 1));
                    if i % 5 == 0 {
                        listener.on_event(event(EventKind::Destroyed, info, i as i64 + 2));
                    }
                }
            })
        })
        .collect();

    let registry = Arc::clone(&h.registry);
    let reader = thread::spawn(move || {
        for _ in 0..100 {
            let snapshots = registry.snapshot_all();
            assert!(snapshots.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
        }
    });

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    // 10 of every 50 modules per writer were destroyed
    assert_eq!(h.registry.len(), 8 * 40);
    assert!(h.registry.snapshot_all().iter().all(|s| s.event_kind() == EventKind::Created));
}

#[tokio::test]
async fn test_notifications_from_blocking_tasks() {
    let h = Harness::new();
    let mut handles = Vec::new();
    for id in 0..16u64 {
        let tracker = h.tracker.clone();
        let listener = h.listener.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            tracker.on_discovered(ModuleId(id), sample_container("c"));
            listener.on_event(event(EventKind::GracePeriod, module(id, "m", "1.0.0"), 7));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshots = h.registry.snapshot_all();
    assert_eq!(snapshots.len(), 16);
    assert_eq!(snapshots.iter().map(|s| s.unsatisfied_count()).sum::<usize>(), 16);
}
