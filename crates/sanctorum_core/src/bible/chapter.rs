//! Parsing of plain-text chapters into numbered verses.

use crate::model::scripture::ChapterVerse;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+[a-z]?)[\s.:)]+(.*)$").expect("numbered verse pattern is valid")
});

/// Splits `"<n> text"` lines into verses.
///
/// Lines that do not start with a verse number continue the previous verse;
/// any text before the first numbered line is dropped. Blank lines are
/// ignored.
pub fn parse_chapter_text(text: &str) -> Vec<ChapterVerse> {
    let mut verses: Vec<ChapterVerse> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(captures) = NUMBERED_LINE.captures(line) {
            verses.push(ChapterVerse {
                verse: captures[1].to_string(),
                text: captures[2].trim().to_string(),
            });
        } else if let Some(last) = verses.last_mut() {
            if !last.text.is_empty() {
                last.text.push(' ');
            }
            last.text.push_str(line);
        }
    }

    verses
}

/// Text read aloud when narration starts at verse `start`.
pub fn narration_text(verses: &[ChapterVerse], start: usize) -> Option<String> {
    let remaining = verses.get(start..)?;
    if remaining.is_empty() {
        return None;
    }
    Some(
        remaining
            .iter()
            .map(|verse| verse.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::{narration_text, parse_chapter_text};

    #[test]
    fn parses_numbered_lines_and_continuations() {
        let text = "Genesis 1\n1 In the beginning, when God created\nthe heavens and the earth\n\n2 and the earth was without form";
        let verses = parse_chapter_text(text);

        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].verse, "1");
        assert_eq!(
            verses[0].text,
            "In the beginning, when God created the heavens and the earth"
        );
        assert_eq!(verses[1].verse, "2");
    }

    #[test]
    fn accepts_punctuated_and_lettered_numbers() {
        let verses = parse_chapter_text("1. First\n4a Half verse\n5) Fifth");
        let numbers: Vec<_> = verses.iter().map(|verse| verse.verse.as_str()).collect();
        assert_eq!(numbers, vec!["1", "4a", "5"]);
    }

    #[test]
    fn empty_text_has_no_verses() {
        assert!(parse_chapter_text("   \n").is_empty());
    }

    #[test]
    fn narration_starts_at_the_requested_verse() {
        let verses = parse_chapter_text("1 Alpha\n2 Beta\n3 Gamma");
        assert_eq!(narration_text(&verses, 1).as_deref(), Some("Beta Gamma"));
        assert_eq!(narration_text(&verses, 3), None);
        assert_eq!(narration_text(&verses, 9), None);
    }
}
