//! Scripture records.

use serde::{Deserialize, Serialize};

/// Search hit: a verse with its full reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVerse {
    /// e.g. `John 3:16`.
    pub reference: String,
    pub text: String,
}

/// One numbered verse inside a chapter being read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterVerse {
    /// Verse number as printed (kept as text; some editions use `4a`).
    pub verse: String,
    pub text: String,
}

/// Gospel reading of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GospelReading {
    pub reference: String,
    pub text: String,
}

impl GospelReading {
    /// Non-empty paragraphs of the reading.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text
            .split('\n')
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
    }
}
