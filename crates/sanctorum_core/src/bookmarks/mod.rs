//! Saved-verse bookmarks.
//!
//! # Responsibility
//! - Keep the device-local set of bookmarked verses with toggle semantics.
//! - Persist the whole set as one versioned JSON document on every change.
//!
//! # Invariants
//! - At most one bookmark per `reference`.
//! - Unreadable stored data never blocks startup; it loads as an empty set.
//! - A newer-format document is never overwritten.

pub mod store;

pub use store::{BookmarkStore, DecodeError, BOOKMARKS_FORMAT_VERSION, BOOKMARKS_KEY};
