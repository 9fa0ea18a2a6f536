//! Integration tests for the entitlement store and its backends.

use zonegate_store::{
    EntitlementRecord, EntitlementStore, JsonFileBackend, MemoryBackend, StoreSnapshot,
    ZoneSelection,
};
use zonegate_types::{BlockPos, PlayerId, TokenId, ZoneId};

fn alice() -> PlayerId {
    PlayerId::new("alice")
}

#[test]
fn test_json_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playerdata.json");
    let (z, t) = (ZoneId::new("1"), TokenId::new("3"));

    {
        let mut store = EntitlementStore::open(JsonFileBackend::new(&path)).unwrap();
        store.set(&alice(), &z, &t, 75);
        let mut sel = ZoneSelection::new("world", BlockPos::new(0, 60, 0));
        sel.second = Some(BlockPos::new(5, 70, 5));
        store.set_selection(&alice(), sel);
    }

    let store = EntitlementStore::open(JsonFileBackend::new(&path)).unwrap();
    assert_eq!(store.get(&alice(), &z, &t), Some(75));
    let sel = store.selection(&alice()).unwrap();
    assert_eq!(sel.world, "world");
    assert_eq!(sel.second, Some(BlockPos::new(5, 70, 5)));
}

#[test]
fn test_open_drops_persisted_zero_records() {
    let backend = MemoryBackend::with_snapshot(StoreSnapshot {
        entitlements: vec![
            EntitlementRecord {
                player: alice(),
                zone: ZoneId::new("1"),
                token: TokenId::new("1"),
                remaining: 0,
            },
            EntitlementRecord {
                player: alice(),
                zone: ZoneId::new("1"),
                token: TokenId::new("2"),
                remaining: 9,
            },
        ],
        selections: Vec::new(),
    });

    let store = EntitlementStore::open(backend).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&alice(), &ZoneId::new("1"), &TokenId::new("1")), None);
}

#[test]
fn test_write_through_persists_every_mutation() {
    let backend = MemoryBackend::new();
    let mut store = EntitlementStore::open(backend.clone()).unwrap();
    let (z, t) = (ZoneId::new("1"), TokenId::new("1"));

    store.set(&alice(), &z, &t, 10);
    store.set(&alice(), &z, &t, 9);
    assert_eq!(backend.writes(), 2);
    assert_eq!(backend.snapshot().entitlements[0].remaining, 9);

    // Removing nothing is not a write.
    store.remove_all(&alice(), &ZoneId::new("404"));
    assert_eq!(backend.writes(), 2);
}

#[test]
fn test_deferred_mode_persists_once_on_flush() {
    let backend = MemoryBackend::new();
    let mut store = EntitlementStore::open(backend.clone()).unwrap();
    let z = ZoneId::new("1");

    store.begin_deferred();
    for i in 0..20 {
        store.set(&PlayerId::new(format!("p{i}")), &z, &TokenId::new("1"), 100);
    }
    assert_eq!(backend.writes(), 0);

    store.flush();
    assert_eq!(backend.writes(), 1);
    assert_eq!(backend.snapshot().entitlements.len(), 20);

    // Clean flush does nothing.
    store.begin_deferred();
    store.flush();
    assert_eq!(backend.writes(), 1);
}

#[test]
fn test_persist_failure_keeps_memory_state_and_counts() {
    let backend = MemoryBackend::new();
    let mut store = EntitlementStore::open(backend.clone()).unwrap();
    let (z, t) = (ZoneId::new("1"), TokenId::new("1"));

    backend.set_unavailable(true);
    store.set(&alice(), &z, &t, 30);
    assert_eq!(store.get(&alice(), &z, &t), Some(30));
    assert_eq!(store.persist_failures(), 1);
    assert!(backend.snapshot().entitlements.is_empty());

    // A failed write is not retried on its own.
    backend.set_unavailable(false);
    store.flush();
    assert!(backend.snapshot().entitlements.is_empty());

    // The next mutation writes the full state, including the lost record.
    store.set(&alice(), &z, &TokenId::new("2"), 10);
    assert_eq!(backend.snapshot().entitlements.len(), 2);
    assert_eq!(store.persist_failures(), 1);
}

#[test]
fn test_open_corrupt_file_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playerdata.json");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(EntitlementStore::open(JsonFileBackend::new(&path)).is_err());
}
