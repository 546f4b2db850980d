//! Chant book service.

use crate::client::{ModelClient, ModelRequest};
use crate::model::chant::{Chant, ChantDetails};
use crate::model::language::Language;
use crate::prompts::PromptBook;
use crate::service::{parse_json, require_text, ServiceError, ServiceResult};

const LIST_FAILED: &str = "Could not load the chant book. Please try again later.";
const LYRICS_FAILED: &str = "Could not load the lyrics for this chant.";

pub struct ChantService<C: ModelClient> {
    client: C,
    prompts: PromptBook,
}

impl<C: ModelClient> ChantService<C> {
    pub fn new(client: C, prompts: PromptBook) -> Self {
        Self { client, prompts }
    }

    pub fn prepare_list(&self, lang: Language) -> ModelRequest {
        self.prompts.chant_list(lang)
    }

    pub fn interpret_list(&self, raw: &str) -> ServiceResult<Vec<Chant>> {
        let chants: Vec<Chant> =
            parse_json(raw).map_err(ServiceError::invalid_response(LIST_FAILED))?;
        Ok(chants
            .into_iter()
            .filter(|chant| !chant.title.trim().is_empty())
            .collect())
    }

    pub fn list(&self, lang: Language) -> ServiceResult<Vec<Chant>> {
        let response = self
            .client
            .generate(&self.prepare_list(lang))
            .map_err(ServiceError::client(LIST_FAILED))?;
        self.interpret_list(&response.text)
    }

    pub fn prepare_lyrics(&self, title: &str, lang: Language) -> ServiceResult<ModelRequest> {
        let title = require_text(title, "Chant title")?;
        Ok(self.prompts.chant_lyrics(&title, lang))
    }

    pub fn interpret_lyrics(&self, title: &str, raw: &str) -> ServiceResult<ChantDetails> {
        let lyrics = raw.trim();
        if lyrics.is_empty() {
            return Err(ServiceError::Rejected(LYRICS_FAILED.to_string()));
        }
        Ok(ChantDetails {
            title: title.trim().to_string(),
            lyrics: lyrics.to_string(),
        })
    }

    pub fn lyrics(&self, title: &str, lang: Language) -> ServiceResult<ChantDetails> {
        let request = self.prepare_lyrics(title, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(LYRICS_FAILED))?;
        self.interpret_lyrics(title, &response.text)
    }
}
