use sanctorum_core::bookmarks::store::{decode, encode};
use sanctorum_core::bookmarks::{
    BookmarkStore, DecodeError, BOOKMARKS_FORMAT_VERSION, BOOKMARKS_KEY,
};
use sanctorum_core::db::open_db;
use sanctorum_core::{
    BookmarkedVerse, EntryStore, FileEntryStore, MemoryEntryStore, SqliteEntryStore, StoreError,
    StoreResult,
};
use std::cell::Cell;

fn genesis_1_1() -> BookmarkedVerse {
    BookmarkedVerse::new(
        "Genesis",
        "1",
        "1",
        "In the beginning God created the heavens and the earth.",
    )
}

fn john_3_16() -> BookmarkedVerse {
    BookmarkedVerse::new("John", "3", "16", "For God so loved the world")
}

#[test]
fn toggle_twice_restores_original_set() {
    let mut store = BookmarkStore::open(MemoryEntryStore::new());
    store.toggle(john_3_16()).unwrap();

    let before = store.list().to_vec();
    store.toggle(genesis_1_1()).unwrap();
    assert_eq!(store.len(), 2);
    store.toggle(genesis_1_1()).unwrap();

    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn toggling_same_verse_twice_leaves_nothing_saved() {
    let storage = MemoryEntryStore::new();
    let mut store = BookmarkStore::open(&storage);

    let after_first = store.toggle(genesis_1_1()).unwrap().to_vec();
    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first[0].reference, "Genesis 1:1");
    assert!(store.is_bookmarked("Genesis 1:1"));

    let after_second = store.toggle(genesis_1_1()).unwrap();
    assert!(after_second.is_empty());

    let reopened = BookmarkStore::open(&storage);
    assert!(reopened.is_empty());
}

#[test]
fn toggle_matches_on_reference_only() {
    let mut store = BookmarkStore::open(MemoryEntryStore::new());
    store.toggle(genesis_1_1()).unwrap();

    let edited = BookmarkedVerse::new("Genesis", "1", "1", "different translation");
    let remaining = store.toggle(edited).unwrap();
    assert!(remaining.is_empty());
}

#[test]
fn remove_absent_reference_is_a_no_op() {
    let storage = MemoryEntryStore::new();
    let mut store = BookmarkStore::open(&storage);
    store.toggle(john_3_16()).unwrap();
    let persisted = storage.load(BOOKMARKS_KEY).unwrap();

    let remaining = store.remove("Psalms 23:1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(storage.load(BOOKMARKS_KEY).unwrap(), persisted);

    assert!(store.remove("John 3:16").unwrap().is_empty());
}

#[test]
fn saved_set_survives_reload() {
    let storage = MemoryEntryStore::new();
    {
        let mut store = BookmarkStore::open(&storage);
        store.toggle(genesis_1_1()).unwrap();
        store.toggle(john_3_16()).unwrap();
    }

    let reopened = BookmarkStore::open(&storage);
    let references: Vec<&str> = reopened
        .list()
        .iter()
        .map(|bookmark| bookmark.reference.as_str())
        .collect();
    assert_eq!(references, vec!["Genesis 1:1", "John 3:16"]);
    assert_eq!(reopened.list()[1].display_text(), "For God so loved the world");
}

#[test]
fn corrupt_document_loads_as_empty() {
    let storage = MemoryEntryStore::with_entry(BOOKMARKS_KEY, "{not json");
    let mut store = BookmarkStore::open(&storage);
    assert!(store.is_empty());

    store.toggle(john_3_16()).unwrap();
    let reopened = BookmarkStore::open(&storage);
    assert_eq!(reopened.len(), 1);
}

#[test]
fn newer_format_version_loads_as_empty() {
    let storage = MemoryEntryStore::with_entry(
        BOOKMARKS_KEY,
        r#"{"version":99,"bookmarks":[{"book":"John","chapter":"3","reference":"John 3:16","text":"16 For God"}]}"#,
    );
    assert!(BookmarkStore::open(&storage).is_empty());
    assert_eq!(
        decode(r#"{"version":99,"bookmarks":[]}"#),
        Err(DecodeError::UnsupportedVersion(99))
    );
}

#[test]
fn newer_format_document_survives_toggle() {
    let newer = r#"{"version":2,"bookmarks":[{"book":"John","chapter":"3","reference":"John 3:16","text":"16 For God"}]}"#;
    let storage = MemoryEntryStore::with_entry(BOOKMARKS_KEY, newer);
    let mut store = BookmarkStore::open(&storage);
    assert!(store.is_read_only());

    let err = store.toggle(genesis_1_1()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NewerFormat {
            version: 2,
            supported: BOOKMARKS_FORMAT_VERSION
        }
    ));
    assert!(store.is_empty());
    assert!(store.remove("John 3:16").unwrap().is_empty());
    assert_eq!(storage.load(BOOKMARKS_KEY).unwrap().as_deref(), Some(newer));
}

#[test]
fn legacy_array_is_accepted_and_cleaned() {
    let legacy = r#"[
        {"book":"John","chapter":"3","reference":"John 3:16","text":"16 For God"},
        {"book":"John","chapter":"3","reference":"John 3:16","text":"16 duplicate"},
        {"book":"","chapter":"1","reference":"Genesis 1:1","text":"1 In"}
    ]"#;
    let store = BookmarkStore::open(MemoryEntryStore::with_entry(BOOKMARKS_KEY, legacy));

    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].text, "16 For God");
}

#[test]
fn encoded_document_is_versioned() {
    let encoded = encode(&[genesis_1_1()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["bookmarks"][0]["reference"], "Genesis 1:1");
}

#[test]
fn sqlite_storage_round_trips_bookmarks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("sanctorum.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = BookmarkStore::open(SqliteEntryStore::new(&conn));
        store.toggle(john_3_16()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = BookmarkStore::open(SqliteEntryStore::new(&conn));
    assert!(store.is_bookmarked("John 3:16"));
}

#[test]
fn file_storage_round_trips_bookmarks() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = BookmarkStore::open(FileEntryStore::new(dir.path()));
        store.toggle(genesis_1_1()).unwrap();
    }

    assert!(dir.path().join(format!("{BOOKMARKS_KEY}.json")).exists());
    let store = BookmarkStore::open(FileEntryStore::new(dir.path()));
    assert!(store.is_bookmarked("Genesis 1:1"));
}

struct FailingSaves {
    attempts: Cell<u32>,
}

impl EntryStore for FailingSaves {
    fn load(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> StoreResult<()> {
        self.attempts.set(self.attempts.get() + 1);
        Err(StoreError::Poisoned)
    }
}

#[test]
fn failed_save_keeps_previous_snapshot() {
    let storage = FailingSaves {
        attempts: Cell::new(0),
    };
    let mut store = BookmarkStore::open(&storage);

    assert!(store.toggle(genesis_1_1()).is_err());
    assert!(store.is_empty());
    assert_eq!(storage.attempts.get(), 1);
}

#[test]
fn unreadable_storage_loads_as_empty() {
    struct BrokenLoads;

    impl EntryStore for BrokenLoads {
        fn load(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Poisoned)
        }

        fn save(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    let mut store = BookmarkStore::open(BrokenLoads);
    assert!(store.is_empty());
    assert_eq!(store.toggle(john_3_16()).unwrap().len(), 1);
}
