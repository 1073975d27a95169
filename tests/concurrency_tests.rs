//! Concurrency and thread safety tests for the message store.
//!
//! The store is the only shared mutable resource in the process; these
//! tests hammer it from many threads and check that IDs stay unique and
//! the collection never corrupts.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use server::MessageStore;

#[test]
fn concurrent_adds_produce_distinct_ids() {
    let store = Arc::new(MessageStore::new());
    let threads = 128;

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.add(format!("message {i}"), format!("sender-{i}")).id)
        })
        .collect();

    let ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(store.len(), threads, "lost or duplicated entries");
    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), threads, "duplicate IDs under concurrency");
}

#[test]
fn interleaved_adds_and_deletes_keep_ids_unique() {
    let store = Arc::new(MessageStore::new());

    // Pre-populate so the deleters have guaranteed targets.
    let seeded: Vec<u64> = (0..100)
        .map(|i| store.add(format!("seed {i}"), "seeder".into()).id)
        .collect();

    let mut handles = Vec::new();

    // Four deleters each own a disjoint quarter of the seeded IDs.
    for chunk in seeded.chunks(25) {
        let store = Arc::clone(&store);
        let ids = chunk.to_vec();
        handles.push(thread::spawn(move || {
            for id in ids {
                store.delete_by_id(id).expect("seeded ID must be deletable");
            }
        }));
    }

    // Four adders insert concurrently with the deletions.
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                store.add(format!("new {t}-{i}"), "adder".into());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // All seeds deleted, all new adds present.
    assert_eq!(store.len(), 100);
    let ids: Vec<u64> = store.list().iter().map(|m| m.id).collect();
    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len(), "duplicate IDs after churn");
}

#[test]
fn only_one_concurrent_delete_succeeds() {
    let store = Arc::new(MessageStore::new());
    let target = store.add("delete me".into(), "a".into());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let id = target.id;
            thread::spawn(move || store.delete_by_id(id).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|deleted| *deleted)
        .count();

    assert_eq!(successes, 1, "exactly one delete may win");
    assert!(store.is_empty());
}

#[test]
fn readers_see_consistent_snapshots_during_writes() {
    let store = Arc::new(MessageStore::new());
    let mut handles = Vec::new();

    // Writers: no deletions here, so insertion order implies strictly
    // increasing IDs in every snapshot.
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                store.add(format!("w{t}-{i}"), "writer".into());
            }
        }));
    }

    // Readers poll snapshots while the writers run.
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let snapshot = store.list();
                let ids: Vec<u64> = snapshot.iter().map(|m| m.id).collect();
                assert!(
                    ids.windows(2).all(|w| w[0] < w[1]),
                    "snapshot IDs out of order: {ids:?}"
                );
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 200);
}
