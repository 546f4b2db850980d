//! Domain records shared by services, stores and the FFI layer.
//!
//! # Responsibility
//! - Define the typed shape of every structured model response.
//! - Define the persisted bookmark record and its reference key.
//!
//! # Invariants
//! - Wire field names match the JSON shapes requested from the model
//!   (camelCase where the response schema says so).
//! - `BookmarkedVerse::reference` is the only bookmark identity.

pub mod bookmark;
pub mod chant;
pub mod language;
pub mod miracle;
pub mod saint;
pub mod scripture;
pub mod suggestion;
