use pretty_assertions::assert_eq;
use sculptor_store::{ExampleStore, StoreError};
use sculptor_types::{Platform, ValidationError};

fn store() -> ExampleStore {
    ExampleStore::open_in_memory().unwrap()
}

// ── add_example ──────────────────────────────────────────────────

#[test]
fn add_example_trims_and_persists() {
    let store = store();
    let example = store
        .add_example(Platform::LinkedIn, "  thought leadership  ")
        .unwrap();
    assert_eq!(example.content, "thought leadership");

    let listed = store.list_examples(Platform::LinkedIn).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], example);
}

#[test]
fn add_example_rejects_empty_content() {
    let store = store();
    let err = store.add_example(Platform::Twitter, "").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyContent)
    ));
    // Nothing persisted.
    assert_eq!(store.count_examples(Platform::Twitter).unwrap(), 0);
}

#[test]
fn add_example_rejects_whitespace_only_content() {
    let store = store();
    let err = store.add_example(Platform::Twitter, "   ").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyContent)
    ));
    assert_eq!(store.count_examples(Platform::Twitter).unwrap(), 0);
}

#[test]
fn examples_are_isolated_per_platform() {
    let store = store();
    store.add_example(Platform::LinkedIn, "professional post").unwrap();
    store.add_example(Platform::Instagram, "caption vibes").unwrap();

    assert_eq!(store.count_examples(Platform::LinkedIn).unwrap(), 1);
    assert_eq!(store.count_examples(Platform::Instagram).unwrap(), 1);
    assert_eq!(store.count_examples(Platform::Twitter).unwrap(), 0);
}

// ── Ordering ─────────────────────────────────────────────────────

#[test]
fn list_examples_returns_insertion_order() {
    let store = store();
    for content in ["first", "second", "third"] {
        store.add_example(Platform::Twitter, content).unwrap();
    }

    let listed = store.list_examples(Platform::Twitter).unwrap();
    let contents: Vec<&str> = listed.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["first", "second", "third"]);
}

#[test]
fn recent_examples_returns_newest_first_limited() {
    let store = store();
    for content in ["first", "second", "third"] {
        store.add_example(Platform::Twitter, content).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let recent = store.recent_examples(Platform::Twitter, 2).unwrap();
    let contents: Vec<&str> = recent.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["third", "second"]);
}

#[test]
fn list_examples_empty_platform_returns_empty_vec() {
    let store = store();
    assert!(store.list_examples(Platform::Instagram).unwrap().is_empty());
}

// ── import_blocks ────────────────────────────────────────────────

#[test]
fn import_blocks_splits_on_blank_lines() {
    let store = store();
    let added = store
        .import_blocks(Platform::LinkedIn, "first example\n\nsecond example\n\n\n\nthird")
        .unwrap();
    assert_eq!(added, 3);
    assert_eq!(store.count_examples(Platform::LinkedIn).unwrap(), 3);
}

#[test]
fn import_blocks_skips_whitespace_only_blocks() {
    let store = store();
    let added = store.import_blocks(Platform::Twitter, "   \n\n  \t ").unwrap();
    assert_eq!(added, 0);
}

// ── Durability ───────────────────────────────────────────────────

#[test]
fn examples_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");

    {
        let store = ExampleStore::new(&path).unwrap();
        store.add_example(Platform::LinkedIn, "persisted").unwrap();
    }

    let reopened = ExampleStore::new(&path).unwrap();
    let listed = reopened.list_examples(Platform::LinkedIn).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "persisted");
}
