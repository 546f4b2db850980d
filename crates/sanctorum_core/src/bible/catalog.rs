//! Catholic canon (73 books) with chapter counts.

/// `(book, chapter_count)` in canonical order.
pub const BIBLE_BOOKS: &[(&str, u32)] = &[
    // Old Testament
    ("Genesis", 50),
    ("Exodus", 40),
    ("Leviticus", 27),
    ("Numbers", 36),
    ("Deuteronomy", 34),
    ("Joshua", 24),
    ("Judges", 21),
    ("Ruth", 4),
    ("1 Samuel", 31),
    ("2 Samuel", 24),
    ("1 Kings", 22),
    ("2 Kings", 25),
    ("1 Chronicles", 29),
    ("2 Chronicles", 36),
    ("Ezra", 10),
    ("Nehemiah", 13),
    ("Tobit", 14),
    ("Judith", 16),
    ("Esther", 10),
    ("1 Maccabees", 16),
    ("2 Maccabees", 15),
    ("Job", 42),
    ("Psalms", 150),
    ("Proverbs", 31),
    ("Ecclesiastes", 12),
    ("Song of Solomon", 8),
    ("Wisdom", 19),
    ("Sirach", 51),
    ("Isaiah", 66),
    ("Jeremiah", 52),
    ("Lamentations", 5),
    ("Baruch", 6),
    ("Ezekiel", 48),
    ("Daniel", 14),
    ("Hosea", 14),
    ("Joel", 3),
    ("Amos", 9),
    ("Obadiah", 1),
    ("Jonah", 4),
    ("Micah", 7),
    ("Nahum", 3),
    ("Habakkuk", 3),
    ("Zephaniah", 3),
    ("Haggai", 2),
    ("Zechariah", 14),
    ("Malachi", 4),
    // New Testament
    ("Matthew", 28),
    ("Mark", 16),
    ("Luke", 24),
    ("John", 21),
    ("Acts", 28),
    ("Romans", 16),
    ("1 Corinthians", 16),
    ("2 Corinthians", 13),
    ("Galatians", 6),
    ("Ephesians", 6),
    ("Philippians", 4),
    ("Colossians", 4),
    ("1 Thessalonians", 5),
    ("2 Thessalonians", 3),
    ("1 Timothy", 6),
    ("2 Timothy", 4),
    ("Titus", 3),
    ("Philemon", 1),
    ("Hebrews", 13),
    ("James", 5),
    ("1 Peter", 5),
    ("2 Peter", 3),
    ("1 John", 5),
    ("2 John", 1),
    ("3 John", 1),
    ("Jude", 1),
    ("Revelation", 22),
];

/// Saints offered as one-tap searches on the saints screen.
pub const FEATURED_SAINTS: &[&str] = &[
    "Francis of Assisi",
    "Thérèse of Lisieux",
    "Augustine of Hippo",
    "Joan of Arc",
    "Thomas Aquinas",
    "Maximilian Kolbe",
];

/// Book opened by default in the reader.
pub const DEFAULT_BOOK: &str = "Genesis";

/// Chapter count for `book`, `None` when the book is not in the canon.
pub fn chapter_count(book: &str) -> Option<u32> {
    BIBLE_BOOKS
        .iter()
        .find(|(name, _)| *name == book)
        .map(|(_, count)| *count)
}

/// Selectable chapters for `book`; unknown books offer a single chapter.
pub fn chapter_options(book: &str) -> Vec<u32> {
    (1..=chapter_count(book).unwrap_or(1)).collect()
}

/// Whether `chapter` (as typed by the user) exists in `book`.
pub fn is_valid_chapter(book: &str, chapter: &str) -> bool {
    match (chapter_count(book), chapter.trim().parse::<u32>()) {
        (Some(count), Ok(number)) => (1..=count).contains(&number),
        _ => false,
    }
}
