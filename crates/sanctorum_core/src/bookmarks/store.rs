//! Bookmark store over an injected [`EntryStore`].
//!
//! # Invariants
//! - The in-memory snapshot changes only after the new set was saved.
//! - Order of the set is insertion order within a session; callers must not
//!   rely on it across reloads.
//! - Load accepts the current envelope and the legacy bare array.
//! - A document from a newer format version is never overwritten.

use crate::model::bookmark::BookmarkedVerse;
use crate::repo::entry_repo::{EntryStore, StoreError, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Storage key of the bookmark document.
pub const BOOKMARKS_KEY: &str = "saints-app-bookmarks";
/// Version written into the persisted envelope.
pub const BOOKMARKS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    bookmarks: &'a [BookmarkedVerse],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    bookmarks: Vec<BookmarkedVerse>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBookmarks {
    Versioned(Envelope),
    Legacy(Vec<BookmarkedVerse>),
}

/// Why a stored document could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Malformed(String),
    UnsupportedVersion(u32),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed_json: {detail}"),
            Self::UnsupportedVersion(version) => write!(
                f,
                "unsupported_version: {version} > {BOOKMARKS_FORMAT_VERSION}"
            ),
        }
    }
}

/// Device-local set of bookmarked verses.
pub struct BookmarkStore<S: EntryStore> {
    storage: S,
    bookmarks: Vec<BookmarkedVerse>,
    /// Set when the stored document is from a newer format version.
    newer_version: Option<u32>,
}

impl<S: EntryStore> BookmarkStore<S> {
    /// Loads the persisted set from `storage`.
    ///
    /// Missing, corrupt or too-new data yields an empty set; the cause is
    /// logged and never returned. A too-new document also makes the store
    /// read-only so it is not replaced.
    pub fn open(storage: S) -> Self {
        let mut newer_version = None;
        let bookmarks = match storage.load(BOOKMARKS_KEY) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|reason| {
                warn!(
                    "event=bookmarks_load module=bookmarks status=degraded reason={}",
                    reason
                );
                if let DecodeError::UnsupportedVersion(version) = reason {
                    newer_version = Some(version);
                }
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=bookmarks_load module=bookmarks status=degraded reason=storage_error error={}",
                    err
                );
                Vec::new()
            }
        };

        info!(
            "event=bookmarks_load module=bookmarks status=ok count={}",
            bookmarks.len()
        );
        Self {
            storage,
            bookmarks,
            newer_version,
        }
    }

    /// True when changes are refused to protect a newer stored document.
    pub fn is_read_only(&self) -> bool {
        self.newer_version.is_some()
    }

    /// Current snapshot.
    pub fn list(&self) -> &[BookmarkedVerse] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn is_bookmarked(&self, reference: &str) -> bool {
        self.bookmarks
            .iter()
            .any(|bookmark| bookmark.reference == reference)
    }

    /// Removes `verse` when its reference is saved, otherwise adds it.
    ///
    /// Returns the full updated set after it was persisted.
    pub fn toggle(&mut self, verse: BookmarkedVerse) -> StoreResult<&[BookmarkedVerse]> {
        let next = if self.is_bookmarked(&verse.reference) {
            self.without(&verse.reference)
        } else {
            let mut next = self.bookmarks.clone();
            next.push(verse);
            next
        };
        self.commit(next, "toggle")
    }

    /// Deletes the bookmark with exactly this reference; no-op when absent.
    pub fn remove(&mut self, reference: &str) -> StoreResult<&[BookmarkedVerse]> {
        if !self.is_bookmarked(reference) {
            return Ok(&self.bookmarks);
        }
        let next = self.without(reference);
        self.commit(next, "remove")
    }

    fn without(&self, reference: &str) -> Vec<BookmarkedVerse> {
        self.bookmarks
            .iter()
            .filter(|bookmark| bookmark.reference != reference)
            .cloned()
            .collect()
    }

    fn commit(
        &mut self,
        next: Vec<BookmarkedVerse>,
        operation: &'static str,
    ) -> StoreResult<&[BookmarkedVerse]> {
        if let Some(version) = self.newer_version {
            warn!(
                "event=bookmarks_save module=bookmarks status=refused op={} version={}",
                operation, version
            );
            return Err(StoreError::NewerFormat {
                version,
                supported: BOOKMARKS_FORMAT_VERSION,
            });
        }
        let encoded = encode(&next)?;
        if let Err(err) = self.storage.save(BOOKMARKS_KEY, &encoded) {
            warn!(
                "event=bookmarks_save module=bookmarks status=error op={} error={}",
                operation, err
            );
            return Err(err);
        }
        info!(
            "event=bookmarks_save module=bookmarks status=ok op={} count={}",
            operation,
            next.len()
        );
        self.bookmarks = next;
        Ok(&self.bookmarks)
    }
}

/// Serializes a bookmark set into the versioned envelope.
pub fn encode(bookmarks: &[BookmarkedVerse]) -> StoreResult<String> {
    let envelope = EnvelopeRef {
        version: BOOKMARKS_FORMAT_VERSION,
        bookmarks,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a stored document.
///
/// Invalid records are skipped and duplicate references collapse to the
/// first occurrence.
pub fn decode(raw: &str) -> Result<Vec<BookmarkedVerse>, DecodeError> {
    let stored: StoredBookmarks =
        serde_json::from_str(raw).map_err(|err| DecodeError::Malformed(err.to_string()))?;

    let records = match stored {
        StoredBookmarks::Versioned(envelope) => {
            if envelope.version > BOOKMARKS_FORMAT_VERSION {
                return Err(DecodeError::UnsupportedVersion(envelope.version));
            }
            envelope.bookmarks
        }
        StoredBookmarks::Legacy(records) => records,
    };

    let mut seen = HashSet::new();
    Ok(records
        .into_iter()
        .filter(|record| record.validate().is_ok())
        .filter(|record| seen.insert(record.reference.clone()))
        .collect())
}
