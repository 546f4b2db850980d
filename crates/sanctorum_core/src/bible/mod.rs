//! Scripture catalog and chapter-text handling.
//!
//! # Responsibility
//! - Know the Catholic canon's books and chapter counts.
//! - Turn model-produced chapter text into numbered verses.

pub mod catalog;
pub mod chapter;
