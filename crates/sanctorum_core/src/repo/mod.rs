//! Storage abstractions for named, whole-value entries.
//!
//! # Responsibility
//! - Define the load/save contract the bookmark store depends on.
//! - Provide SQLite, file and in-memory implementations.
//!
//! # Invariants
//! - `save` replaces the whole value for a key; there are no partial writes.
//! - Keys are non-blank and free of path separators.

pub mod entry_repo;
