use enroll::{IdentityRecord, IdentityStore, StoreError};
use std::fs;

#[test]
fn absent_store_starts_at_one() {
    let dir = tempfile::tempdir().unwrap();
    let store = IdentityStore::new(dir.path().join("names.txt"));
    assert_eq!(store.next_id().unwrap(), 1);
    assert!(store.records().unwrap().is_empty());
}

#[test]
fn empty_store_starts_at_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.txt");
    fs::write(&path, "").unwrap();
    assert_eq!(IdentityStore::new(path).next_id().unwrap(), 1);
}

#[test]
fn next_id_is_one_past_the_largest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.txt");
    fs::write(&path, "3,Carol,555\n1,Alice,111\n\n4,Dave,444\n").unwrap();
    assert_eq!(IdentityStore::new(path).next_id().unwrap(), 5);
}

#[test]
fn append_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = IdentityStore::new(dir.path().join("names.txt"));
    let alice = IdentityRecord::new(1, "Alice", "555-1234");
    let bob = IdentityRecord::new(2, "Bob Smith", "five five five");
    store.append(&alice).unwrap();
    store.append(&bob).unwrap();

    assert_eq!(store.records().unwrap(), vec![alice, bob]);
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "1,Alice,555-1234\n2,Bob Smith,five five five\n"
    );
    assert_eq!(store.next_id().unwrap(), 3);
}

#[test]
fn empty_fields_are_kept_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let store = IdentityStore::new(dir.path().join("names.txt"));
    store.append(&IdentityRecord::new(1, "", "")).unwrap();
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "1,,\n");
    assert_eq!(store.records().unwrap(), vec![IdentityRecord::new(1, "", "")]);
}

#[test]
fn non_numeric_id_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.txt");
    fs::write(&path, "1,Alice,555\nAlice,555\n").unwrap();
    match IdentityStore::new(path).next_id() {
        Err(StoreError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed record, got {other:?}"),
    }
}

#[test]
fn largest_possible_id_exhausts_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.txt");
    fs::write(&path, format!("1,Alice,555\n{},Zed,999\n", u32::MAX)).unwrap();
    match IdentityStore::new(path).next_id() {
        Err(StoreError::IdsExhausted(id)) => assert_eq!(id, u32::MAX),
        other => panic!("expected exhausted ids, got {other:?}"),
    }
}
