//! Bookmarked verse model.
//!
//! # Responsibility
//! - Define the persisted record for a saved scripture verse.
//! - Own the one formatting rule for verse references.
//!
//! # Invariants
//! - `reference` is `"{book} {chapter}:{verse}"` and is the sole dedup key.
//! - `book`, `chapter` and `reference` are never blank.
//! - `text`, `book` and `chapter` are informational only.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static LEADING_VERSE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\s").expect("leading verse number pattern is valid")
});

/// Formats the reference key for a verse.
///
/// Every lookup and every newly created bookmark must go through this
/// function; references formatted any other way will not match.
pub fn verse_reference(book: &str, chapter: &str, verse: &str) -> String {
    format!("{} {}:{}", book.trim(), chapter.trim(), verse.trim())
}

/// Validation errors for bookmark records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkValidationError {
    BlankBook,
    BlankChapter,
    BlankReference,
}

impl Display for BookmarkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankBook => write!(f, "bookmark book must not be blank"),
            Self::BlankChapter => write!(f, "bookmark chapter must not be blank"),
            Self::BlankReference => write!(f, "bookmark reference must not be blank"),
        }
    }
}

impl Error for BookmarkValidationError {}

/// One saved scripture verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkedVerse {
    pub book: String,
    pub chapter: String,
    /// `"{book} {chapter}:{verse}"`.
    pub reference: String,
    /// Verse text as displayed when saved, usually prefixed by its number.
    pub text: String,
}

impl BookmarkedVerse {
    /// Builds a bookmark with a computed reference.
    ///
    /// `text` is stored as `"{verse} {verse_text}"` so list views can show the
    /// verse number without re-deriving it.
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: &str,
        verse_text: &str,
    ) -> Self {
        let book = book.into();
        let chapter = chapter.into();
        let reference = verse_reference(&book, &chapter, verse);
        Self {
            book: book.trim().to_string(),
            chapter: chapter.trim().to_string(),
            reference,
            text: format!("{} {}", verse.trim(), verse_text.trim()),
        }
    }

    pub fn validate(&self) -> Result<(), BookmarkValidationError> {
        if self.book.trim().is_empty() {
            return Err(BookmarkValidationError::BlankBook);
        }
        if self.chapter.trim().is_empty() {
            return Err(BookmarkValidationError::BlankChapter);
        }
        if self.reference.trim().is_empty() {
            return Err(BookmarkValidationError::BlankReference);
        }
        Ok(())
    }

    /// Verse part of the reference (after the last `:`), if present.
    pub fn verse_number(&self) -> Option<&str> {
        self.reference
            .rsplit_once(':')
            .map(|(_, verse)| verse)
            .filter(|verse| !verse.is_empty())
    }

    /// Text without its leading `"<n> "` verse number.
    pub fn display_text(&self) -> &str {
        match LEADING_VERSE_NUMBER.find(&self.text) {
            Some(found) => &self.text[found.end()..],
            None => &self.text,
        }
    }
}
