use mylog::{LogEntry, LogStore};
use std::collections::HashSet;

fn titles(entries: &[LogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn list_is_sorted_by_title() {
    let mut store = LogStore::open_in_memory().unwrap();
    store.create("Worst Animal", "Cthulu", None).unwrap();
    store.create("Best Language", "Swift", None).unwrap();
    store.create("Worst Language", "LOLCODE", None).unwrap();
    store.create("Best Animal", "Dog", None).unwrap();

    let entries = store.list().unwrap();
    assert_eq!(
        titles(&entries),
        vec!["Best Animal", "Best Language", "Worst Animal", "Worst Language"]
    );
    assert_eq!(entries[0].text, "Dog");
    assert_eq!(entries[3].text, "LOLCODE");
}

#[test]
fn create_in_display_order_lists_in_same_order() {
    let mut store = LogStore::open_in_memory().unwrap();
    store.create("Best Animal", "Dog", None).unwrap();
    store.create("Best Language", "Swift", None).unwrap();
    store.create("Worst Animal", "Cthulu", None).unwrap();
    store.create("Worst Language", "LOLCODE", None).unwrap();

    assert_eq!(
        titles(&store.list().unwrap()),
        vec!["Best Animal", "Best Language", "Worst Animal", "Worst Language"]
    );
}

#[test]
fn list_has_every_live_entry_exactly_once() {
    let mut store = LogStore::open_in_memory().unwrap();
    let mut created = Vec::new();
    for i in 0..20 {
        created.push(store.create(format!("t{}", i % 7), format!("x{}", i), None).unwrap());
    }
    for entry in created.iter().step_by(3) {
        store.delete(entry.id).unwrap();
    }

    let listed = store.list().unwrap();
    let expected: HashSet<_> = created
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 3 != 0)
        .map(|(_, e)| e.id)
        .collect();
    let listed_ids: HashSet<_> = listed.iter().map(|e| e.id).collect();

    assert_eq!(listed.len(), expected.len());
    assert_eq!(listed_ids, expected);
    assert!(listed
        .windows(2)
        .all(|w| w[0].title.as_bytes() <= w[1].title.as_bytes()));
}

#[test]
fn create_then_delete_leaves_empty_list() {
    let mut store = LogStore::open_in_memory().unwrap();
    let entry = store.create("A", "", None).unwrap();
    store.delete(entry.id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn deleted_entry_never_reappears() {
    let mut store = LogStore::open_in_memory().unwrap();
    let entry = store.create("gone", "x", None).unwrap();
    store.save().unwrap();
    store.delete(entry.id).unwrap();

    assert!(store.list().unwrap().iter().all(|e| e.id != entry.id));
    store.save().unwrap();
    assert!(store.list().unwrap().iter().all(|e| e.id != entry.id));
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let mut store = LogStore::open_in_memory().unwrap();
    store.create("one", "1", None).unwrap();
    store.create("two", "2", None).unwrap();
    let before = store.list().unwrap();

    store.delete(uuid::Uuid::new_v4()).unwrap();
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn deleting_twice_is_harmless() {
    let mut store = LogStore::open_in_memory().unwrap();
    let entry = store.create("one", "1", None).unwrap();
    store.save().unwrap();

    store.delete(entry.id).unwrap();
    store.delete(entry.id).unwrap();
    store.save().unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn identical_entries_get_distinct_ids_and_stable_order() {
    let mut store = LogStore::open_in_memory().unwrap();
    let first = store.create("B", "x", None).unwrap();
    let second = store.create("B", "x", None).unwrap();
    assert_ne!(first.id, second.id);

    let listed = store.list().unwrap();
    assert_eq!(titles(&listed), vec!["B", "B"]);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
    assert_eq!(store.list().unwrap(), listed);
}

#[test]
fn ids_are_never_reused() {
    let mut store = LogStore::open_in_memory().unwrap();
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let entry = store.create("same", "", None).unwrap();
        assert!(seen.insert(entry.id));
        store.delete(entry.id).unwrap();
    }
}

#[test]
fn snapshot_is_detached_from_store() {
    let mut store = LogStore::open_in_memory().unwrap();
    store.create("a", "", None).unwrap();
    let mut snapshot = store.list().unwrap();
    snapshot[0].title = "changed".to_string();
    snapshot.clear();

    assert_eq!(titles(&store.list().unwrap()), vec!["a"]);
}
