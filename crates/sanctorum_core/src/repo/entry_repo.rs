//! Entry store contract and implementations.
//!
//! # Responsibility
//! - Persist one serialized document per key.
//! - Keep SQL and file-system details behind [`EntryStore`].
//!
//! # Invariants
//! - `load` returns `Ok(None)` for a key that was never saved.
//! - `save` is all-or-nothing for the value it writes.

use crate::db::DbError;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const ENTRY_FILE_EXTENSION: &str = "json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by entry storage backends.
#[derive(Debug)]
pub enum StoreError {
    InvalidKey(String),
    Db(DbError),
    Io { path: PathBuf, source: std::io::Error },
    Serialize(serde_json::Error),
    /// Stored document was written by a newer format; it is kept read-only.
    NewerFormat { version: u32, supported: u32 },
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid entry key `{key}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "entry file error at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize entry: {err}"),
            Self::NewerFormat { version, supported } => write!(
                f,
                "stored data uses format version {version}, newer than supported {supported}"
            ),
            Self::Poisoned => write!(f, "entry store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidKey(_) | Self::NewerFormat { .. } | Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable storage of whole serialized values by key.
pub trait EntryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: EntryStore + ?Sized> EntryStore for &S {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).save(key, value)
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    let trimmed = key.trim();
    if trimmed.is_empty()
        || trimmed != key
        || key.contains(['/', '\\'])
        || key == "."
        || key == ".."
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// SQLite-backed entry store over the `app_entries` table.
pub struct SqliteEntryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryStore for SqliteEntryStore<'_> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        self.conn.execute(
            "INSERT INTO app_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        debug!(
            "event=entry_save module=repo status=ok backend=sqlite key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}

/// Directory-backed entry store: one `<key>.json` file per key.
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the target, so readers never observe a half-written value.
#[derive(Debug, Clone)]
pub struct FileEntryStore {
    dir: PathBuf,
}

impl FileEntryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ENTRY_FILE_EXTENSION}"))
    }
}

impl EntryStore for FileEntryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        let path = self.entry_path(key);
        let io_error = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        staged.write_all(value.as_bytes()).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;
        staged.persist(&path).map_err(|err| {
            error!(
                "event=entry_save module=repo status=error backend=file key={} error={}",
                key, err.error
            );
            io_error(err.error)
        })?;

        debug!(
            "event=entry_save module=repo status=ok backend=file key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}

/// Process-local entry store.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one raw value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        store
    }
}

impl EntryStore for MemoryEntryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{check_key, EntryStore, FileEntryStore, MemoryEntryStore, StoreError};

    #[test]
    fn check_key_rejects_paths_and_blanks() {
        assert!(check_key("saints-app-bookmarks").is_ok());
        for key in ["", "  ", " padded", "../escape", "a/b", "a\\b", ".."] {
            assert!(
                matches!(check_key(key), Err(StoreError::InvalidKey(_))),
                "key `{key}` should be rejected"
            );
        }
    }

    #[test]
    fn memory_store_overwrites_whole_value() {
        let store = MemoryEntryStore::new();
        assert_eq!(store.load("k").expect("load"), None);
        store.save("k", "first").expect("save");
        store.save("k", "second").expect("save");
        assert_eq!(store.load("k").expect("load").as_deref(), Some("second"));
    }

    #[test]
    fn file_store_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileEntryStore::new(dir.path().join("nested"));

        assert_eq!(store.load("entry").expect("load missing"), None);
        store.save("entry", "[1,2,3]").expect("save");
        store.save("entry", "[]").expect("overwrite");

        assert_eq!(store.load("entry").expect("load").as_deref(), Some("[]"));
        assert!(store.dir().join("entry.json").exists());
    }
}
