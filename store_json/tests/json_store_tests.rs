//! On-disk behaviour of the JSON backend, including the lost-update hazard
//! of read-modify-write cycles that skip the file lock.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ballot_ledger::Chain;
use ballot_store::{LedgerState, StateStore, StoreError, User, VotePayload};
use ballot_store_json::JsonFileStore;
use ballot_types::{Role, Timestamp};
use ballot_work::WorkGenerator;

fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("chain_db.json"));
    (dir, store)
}

fn sample_state() -> LedgerState {
    let mut state = LedgerState {
        ledger: Chain::with_genesis(&WorkGenerator::sequential(), Timestamp::new(1_700_000_000))
            .unwrap(),
        ..Default::default()
    };
    state
        .users
        .insert("admin".into(), User::new("admin".into(), "Admin", Role::Admin, None));
    state
}

#[test]
fn missing_file_loads_as_none() {
    let (_dir, store) = temp_store();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load_round_trips() {
    let (_dir, store) = temp_store();
    let state = sample_state();
    store.save(&state).unwrap();
    assert_eq!(store.load().unwrap(), Some(state));
}

#[test]
fn save_leaves_no_temp_file() {
    let (dir, store) = temp_store();
    store.save(&sample_state()).unwrap();
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["chain_db.json".to_string()]);
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/deeper/chain_db.json"));
    store.save(&sample_state()).unwrap();
    assert!(store.load().unwrap().is_some());
}

#[test]
fn garbage_file_is_corruption_not_first_run() {
    let (_dir, store) = temp_store();
    std::fs::write(store.path(), b"{ not json").unwrap();
    assert!(matches!(store.load(), Err(StoreError::Corruption(_))));
}

#[test]
fn file_is_pretty_json_with_expected_keys() {
    let (_dir, store) = temp_store();
    store.save(&sample_state()).unwrap();
    let text = std::fs::read_to_string(store.path()).unwrap();
    assert!(text.contains("\n  \"users\""));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["chain"].is_array());
    assert!(value["payloads"].is_array());
}

/// Two writers that each load, mutate, and save without taking
/// [`StateStore::lock`] lose one of the updates.
#[test]
fn unsynchronised_writers_lose_updates() {
    let (_dir, store) = temp_store();
    store.save(&sample_state()).unwrap();

    let mut first = store.load().unwrap().unwrap();
    let mut second = store.load().unwrap().unwrap();

    first.payloads.push(VotePayload::new("e1".into(), "c1".into()));
    store.save(&first).unwrap();

    second.payloads.push(VotePayload::new("e1".into(), "c2".into()));
    store.save(&second).unwrap();

    let last = store.load().unwrap().unwrap();
    assert_eq!(last.payloads.len(), 1);
    assert_eq!(last.payloads[0].candidate_id.as_str(), "c2");
}

#[test]
fn lock_file_sits_beside_the_data_file() {
    let (dir, store) = temp_store();
    let guard = store.lock().unwrap();
    assert!(guard.is_held());
    assert!(dir.path().join("chain_db.json.lock").exists());
    // Locking alone writes no state.
    assert!(store.load().unwrap().is_none());
}

#[test]
fn lock_excludes_a_second_store_on_the_same_file() {
    let (_dir, store) = temp_store();
    let other = JsonFileStore::new(store.path());

    let guard = store.lock().unwrap();
    let (acquired_tx, acquired_rx) = mpsc::channel();
    let waiter = thread::spawn(move || {
        let _guard = other.lock().unwrap();
        acquired_tx.send(()).unwrap();
    });

    assert!(acquired_rx.recv_timeout(Duration::from_millis(200)).is_err());
    drop(guard);
    acquired_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("lock released on drop");
    waiter.join().unwrap();
}

#[test]
fn locked_writers_keep_every_update() {
    let (_dir, store) = temp_store();
    store.save(&sample_state()).unwrap();

    let writers: Vec<_> = ["c1", "c2", "c3", "c4"]
        .into_iter()
        .map(|candidate| {
            let store = JsonFileStore::new(store.path());
            thread::spawn(move || {
                let _guard = store.lock().unwrap();
                let mut state = store.load().unwrap().unwrap();
                thread::sleep(Duration::from_millis(20));
                state
                    .payloads
                    .push(VotePayload::new("e1".into(), candidate.into()));
                store.save(&state).unwrap();
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let last = store.load().unwrap().unwrap();
    assert_eq!(last.payloads.len(), 4);
}
