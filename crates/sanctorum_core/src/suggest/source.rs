//! Suggestion providers.

use crate::client::{ModelClient, ModelRequest};
use crate::model::language::Language;
use crate::prompts::PromptBook;
use crate::service::{parse_json, ServiceError, ServiceResult};

const SUGGEST_FAILED: &str = "Suggestions are unavailable.";

/// Produces up to `limit` completions for a query.
pub trait SuggestionSource {
    fn suggest(&self, query: &str, limit: usize, lang: Language) -> ServiceResult<Vec<String>>;
}

impl<S: SuggestionSource + ?Sized> SuggestionSource for &S {
    fn suggest(&self, query: &str, limit: usize, lang: Language) -> ServiceResult<Vec<String>> {
        (**self).suggest(query, limit, lang)
    }
}

/// Saint-name completions from the hosted model.
pub struct SaintSuggestionService<C: ModelClient> {
    client: C,
    prompts: PromptBook,
}

impl<C: ModelClient> SaintSuggestionService<C> {
    pub fn new(client: C, prompts: PromptBook) -> Self {
        Self { client, prompts }
    }

    pub fn prepare(&self, query: &str, limit: usize, lang: Language) -> ModelRequest {
        self.prompts.saint_suggestions(query.trim(), limit, lang)
    }

    /// Parses a JSON array of names, keeping at most `limit` distinct entries.
    pub fn interpret(&self, raw: &str, limit: usize) -> ServiceResult<Vec<String>> {
        let names: Vec<String> =
            parse_json(raw).map_err(ServiceError::invalid_response(SUGGEST_FAILED))?;
        let mut unique: Vec<String> = Vec::with_capacity(limit);
        for name in names.into_iter().map(|name| name.trim().to_string()) {
            if unique.len() == limit {
                break;
            }
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Ok(unique)
    }
}

impl<C: ModelClient> SuggestionSource for SaintSuggestionService<C> {
    fn suggest(&self, query: &str, limit: usize, lang: Language) -> ServiceResult<Vec<String>> {
        let response = self
            .client
            .generate(&self.prepare(query, limit, lang))
            .map_err(ServiceError::client(SUGGEST_FAILED))?;
        self.interpret(&response.text, limit)
    }
}
