//! Inline driver pairing a debouncer with a suggestion source.

use crate::model::language::Language;
use crate::suggest::debouncer::{
    DebounceConfig, InputOutcome, ResolveOutcome, SuggestionDebouncer,
};
use crate::suggest::source::SuggestionSource;
use std::time::Instant;

/// Runs due requests synchronously through `source` on [`Self::tick`].
///
/// Hosts with their own async runtime use [`SuggestionDebouncer`] directly
/// and call `resolve` when each response lands.
pub struct SuggestionPipeline<S: SuggestionSource> {
    debouncer: SuggestionDebouncer,
    source: S,
    language: Language,
}

impl<S: SuggestionSource> SuggestionPipeline<S> {
    pub fn new(source: S, config: DebounceConfig, language: Language) -> Self {
        Self {
            debouncer: SuggestionDebouncer::new(config),
            source,
            language,
        }
    }

    pub fn on_input(&mut self, text: &str, now: Instant) -> InputOutcome {
        self.debouncer.on_input(text, now)
    }

    /// Issues and resolves the pending request if its quiet period elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<ResolveOutcome> {
        let query = self.debouncer.poll(now)?;
        let limit = self.debouncer.config().max_suggestions;
        let result = self.source.suggest(&query.raw_text, limit, self.language);
        Some(self.debouncer.resolve(&query, result))
    }

    /// Switching language abandons in-flight work and clears the box.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.debouncer.reset();
        }
    }

    pub fn suggestions(&self) -> &[String] {
        self.debouncer.suggestions()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn reset(&mut self) {
        self.debouncer.reset();
    }
}
