//! Suggestion query record.

/// One issued suggestion request.
///
/// Created when the debouncer fires and never mutated afterwards. Only the
/// query carrying the latest `sequence_id` may update visible suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestionQuery {
    pub raw_text: String,
    /// Strictly increasing per issued request.
    pub sequence_id: u64,
}
