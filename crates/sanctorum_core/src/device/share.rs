//! Share sheet payloads.

use crate::model::bookmark::BookmarkedVerse;
use crate::model::miracle::EucharisticMiracle;
use crate::model::saint::SaintInfo;
use crate::model::scripture::BibleVerse;
use serde::{Deserialize, Serialize};

const MAX_SHARE_TEXT_CHARS: usize = 500;

/// Content handed to the system share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SharePayload {
    pub fn for_saint(saint: &SaintInfo) -> Self {
        Self {
            title: saint.name.clone(),
            text: truncate(&format!("{}\n\n{}", saint.feast_day, saint.summary)),
            url: None,
        }
    }

    pub fn for_verse(verse: &BibleVerse) -> Self {
        Self {
            title: verse.reference.clone(),
            text: truncate(&format!("\"{}\" ({})", verse.text, verse.reference)),
            url: None,
        }
    }

    pub fn for_bookmark(bookmark: &BookmarkedVerse) -> Self {
        Self::for_verse(&BibleVerse {
            reference: bookmark.reference.clone(),
            text: bookmark.display_text().to_string(),
        })
    }

    /// Shares the summary and links the first cited source.
    pub fn for_miracle(name: &str, miracle: &EucharisticMiracle) -> Self {
        Self {
            title: name.trim().to_string(),
            text: truncate(&miracle.summary),
            url: miracle.sources.first().map(|source| source.uri.clone()),
        }
    }

    /// Drops `url` unless it is an absolute http(s) link with a host.
    pub fn sanitized(mut self) -> Self {
        if !self.url.as_deref().is_some_and(is_shareable_url) {
            self.url = None;
        }
        self
    }
}

fn is_shareable_url(url: &str) -> bool {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn truncate(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_SHARE_TEXT_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(MAX_SHARE_TEXT_CHARS).collect();
    truncated.push('…');
    truncated
}
