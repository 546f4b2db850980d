//! Scripture reading, search and study service.
//!
//! # Invariants
//! - Chapter requests are only sent for books and chapters in the canon.
//! - A blank search query returns no results without a request.

use crate::bible::catalog::{chapter_count, is_valid_chapter};
use crate::bible::chapter::parse_chapter_text;
use crate::client::{ImageRequest, ImageResponse, ModelClient, ModelRequest};
use crate::model::language::Language;
use crate::model::scripture::{BibleVerse, ChapterVerse, GospelReading};
use crate::prompts::PromptBook;
use crate::service::{parse_json, require_text, ServiceError, ServiceResult};
use log::info;

const CHAPTER_FAILED: &str =
    "Failed to retrieve the specified scripture. Please check the book and chapter.";
const SEARCH_FAILED: &str = "Failed to perform the Bible search. Please try a different query.";
const GOSPEL_FAILED: &str = "Could not load today's Gospel. Please try again later.";
const ASK_FAILED: &str = "Could not answer your question right now. Please try again.";
const ILLUSTRATION_FAILED: &str = "Failed to generate an illustration for this chapter.";

pub struct ScriptureService<C: ModelClient> {
    client: C,
    prompts: PromptBook,
}

impl<C: ModelClient> ScriptureService<C> {
    pub fn new(client: C, prompts: PromptBook) -> Self {
        Self { client, prompts }
    }

    pub fn prepare_chapter(
        &self,
        book: &str,
        chapter: &str,
        lang: Language,
    ) -> ServiceResult<ModelRequest> {
        let book = require_text(book, "Book")?;
        let chapter = require_text(chapter, "Chapter")?;
        if !is_valid_chapter(&book, &chapter) {
            return Err(ServiceError::InvalidInput(match chapter_count(&book) {
                Some(count) => format!("{book} has chapters 1 to {count}."),
                None => format!("Unknown book: {book}."),
            }));
        }
        Ok(self.prompts.chapter_text(&book, &chapter, lang))
    }

    pub fn interpret_chapter(&self, raw: &str) -> ServiceResult<Vec<ChapterVerse>> {
        let verses = parse_chapter_text(raw);
        if verses.is_empty() {
            return Err(ServiceError::InvalidResponse {
                message: CHAPTER_FAILED,
                detail: "no numbered verses in response".to_string(),
            });
        }
        Ok(verses)
    }

    /// Full text of one chapter as numbered verses.
    pub fn chapter(
        &self,
        book: &str,
        chapter: &str,
        lang: Language,
    ) -> ServiceResult<Vec<ChapterVerse>> {
        let request = self.prepare_chapter(book, chapter, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(CHAPTER_FAILED))?;
        let verses = self.interpret_chapter(&response.text)?;
        info!(
            "event=scripture_chapter module=service status=ok verses={}",
            verses.len()
        );
        Ok(verses)
    }

    pub fn prepare_chapter_illustration(
        &self,
        book: &str,
        chapter: &str,
        lang: Language,
    ) -> ServiceResult<ImageRequest> {
        let book = require_text(book, "Book")?;
        let chapter = require_text(chapter, "Chapter")?;
        Ok(self.prompts.chapter_illustration(&book, &chapter, lang))
    }

    /// Illustration of a chapter as a `data:` URL.
    pub fn chapter_illustration(
        &self,
        book: &str,
        chapter: &str,
        lang: Language,
    ) -> ServiceResult<String> {
        let request = self.prepare_chapter_illustration(book, chapter, lang)?;
        let image = self
            .client
            .generate_image(&request)
            .map_err(ServiceError::client(ILLUSTRATION_FAILED))?;
        self.interpret_chapter_illustration(&image)
    }

    pub fn interpret_chapter_illustration(&self, image: &ImageResponse) -> ServiceResult<String> {
        if image.bytes_base64.trim().is_empty() {
            return Err(ServiceError::Rejected(ILLUSTRATION_FAILED.to_string()));
        }
        Ok(image.data_url())
    }

    /// `None` for blank queries: nothing to send.
    pub fn prepare_search(&self, query: &str, lang: Language) -> Option<ModelRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.prompts.bible_search(query, lang))
    }

    pub fn interpret_search(&self, raw: &str) -> ServiceResult<Vec<BibleVerse>> {
        let verses: Vec<BibleVerse> =
            parse_json(raw).map_err(ServiceError::invalid_response(SEARCH_FAILED))?;
        Ok(verses
            .into_iter()
            .filter(|verse| !verse.reference.trim().is_empty())
            .collect())
    }

    /// Verses matching a phrase; empty for a blank query.
    pub fn search(&self, query: &str, lang: Language) -> ServiceResult<Vec<BibleVerse>> {
        let Some(request) = self.prepare_search(query, lang) else {
            return Ok(Vec::new());
        };
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(SEARCH_FAILED))?;
        let verses = self.interpret_search(&response.text)?;
        info!(
            "event=scripture_search module=service status=ok hits={}",
            verses.len()
        );
        Ok(verses)
    }

    pub fn prepare_gospel_of_the_day(
        &self,
        date_label: &str,
        lang: Language,
    ) -> ServiceResult<ModelRequest> {
        let date_label = require_text(date_label, "Date")?;
        Ok(self.prompts.gospel_of_the_day(&date_label, lang))
    }

    pub fn interpret_gospel_of_the_day(&self, raw: &str) -> ServiceResult<GospelReading> {
        parse_json(raw).map_err(ServiceError::invalid_response(GOSPEL_FAILED))
    }

    pub fn gospel_of_the_day(
        &self,
        date_label: &str,
        lang: Language,
    ) -> ServiceResult<GospelReading> {
        let request = self.prepare_gospel_of_the_day(date_label, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(GOSPEL_FAILED))?;
        self.interpret_gospel_of_the_day(&response.text)
    }

    pub fn prepare_ask(
        &self,
        passage: &str,
        question: &str,
        lang: Language,
    ) -> ServiceResult<ModelRequest> {
        let passage = require_text(passage, "Selected passage")?;
        let question = require_text(question, "Question")?;
        Ok(self.prompts.ask_about_passage(&passage, &question, lang))
    }

    /// Free-text answer to a question about a selected passage.
    pub fn ask(&self, passage: &str, question: &str, lang: Language) -> ServiceResult<String> {
        let request = self.prepare_ask(passage, question, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(ASK_FAILED))?;
        let answer = response.text.trim();
        if answer.is_empty() {
            return Err(ServiceError::Rejected(ASK_FAILED.to_string()));
        }
        Ok(answer.to_string())
    }
}
