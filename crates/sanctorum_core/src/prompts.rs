//! Request builders for every model-backed feature.
//!
//! Each builder appends the language instruction to its system instruction
//! and attaches a response schema when the answer is parsed as JSON.

use crate::client::{ImageRequest, ModelRequest};
use crate::config::{AppConfig, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use crate::model::language::Language;
use serde_json::{json, Value};

const IMAGE_ASPECT_RATIO: &str = "1:1";
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Model ids plus the request builders that use them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBook {
    model: String,
    image_model: String,
}

impl Default for PromptBook {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_MODEL, DEFAULT_IMAGE_MODEL)
    }
}

impl PromptBook {
    pub fn new(model: impl Into<String>, image_model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            image_model: image_model.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.model.clone(), config.image_model.clone())
    }

    fn text(&self, prompt: String, instruction: &str, lang: Language) -> ModelRequest {
        ModelRequest {
            model: self.model.clone(),
            prompt,
            system_instruction: format!("{instruction} {}", lang.response_instruction()),
            response_schema: None,
            grounded_search: false,
        }
    }

    fn structured(
        &self,
        prompt: String,
        instruction: &str,
        lang: Language,
        schema: Value,
    ) -> ModelRequest {
        ModelRequest {
            response_schema: Some(schema),
            ..self.text(prompt, instruction, lang)
        }
    }

    fn image(&self, prompt: String) -> ImageRequest {
        ImageRequest {
            model: self.image_model.clone(),
            prompt,
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
            mime_type: IMAGE_MIME_TYPE.to_string(),
        }
    }

    pub fn saint_validation(&self, name: &str, lang: Language) -> ModelRequest {
        self.structured(
            format!("Is the person \"{name}\" a recognized Catholic Saint?"),
            "You are a strict Catholic historian. Your only job is to validate if a name \
             corresponds to a canonized or beatified Catholic Saint. Be precise. If it's a \
             different figure (e.g., a king, a philosopher, a saint from another denomination), \
             you must respond with false.",
            lang,
            saint_validation_schema(),
        )
    }

    pub fn saint_detail(&self, name: &str, lang: Language) -> ModelRequest {
        self.structured(
            format!("Provide a detailed biography and key information for Saint {name}."),
            "You are a knowledgeable and respectful Catholic historian and theologian. Provide \
             accurate, reverent, and concise information about Catholic saints. The tone should \
             be informative and inspiring, suitable for a general Catholic audience.",
            lang,
            saint_info_schema(),
        )
    }

    pub fn saint_portrait(&self, name: &str, lang: Language) -> ImageRequest {
        let prompt = match lang {
            Language::Es => format!(
                "Un retrato etéreo y reverente de San {name}, al estilo de una pintura religiosa \
                 clásica. El santo debe ser representado con la iconografía tradicional asociada \
                 a él. Ambiente sereno e inspirador."
            ),
            Language::En => format!(
                "An ethereal and reverent portrait of Saint {name}, in the style of a classical \
                 religious painting. The saint should be depicted with traditional iconography \
                 associated with them. Serene and inspiring atmosphere."
            ),
        };
        self.image(prompt)
    }

    pub fn saint_suggestions(&self, query: &str, limit: usize, lang: Language) -> ModelRequest {
        self.structured(
            format!(
                "List up to {limit} canonized or beatified Catholic saints whose names match \
                 \"{query}\"."
            ),
            "You are an autocomplete helper for a Catholic saints directory. Return only a JSON \
             array of saint names, most relevant first. Return an empty array when nothing \
             matches.",
            lang,
            json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
        )
    }

    pub fn saints_of_the_day(&self, date_label: &str, lang: Language) -> ModelRequest {
        self.structured(
            format!("Which Catholic saints are celebrated on {date_label}?"),
            "You are a Catholic liturgical calendar. List the saints whose feast falls on the \
             given day, each with a one-sentence description.",
            lang,
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["name", "description"]
                }
            }),
        )
    }

    pub fn chapter_text(&self, book: &str, chapter: &str, lang: Language) -> ModelRequest {
        self.text(
            format!("Provide the full text for the book of {book}, chapter {chapter}."),
            "You are a scripture reference tool. Use the New American Bible, Revised Edition \
             (NABRE) for English requests, and the Biblia de Jerusalén Latinoamericana for \
             Spanish requests. Format the output as a single string, with each verse prefixed by \
             its number on a new line. Example: '1 In the beginning...\\n2 And the earth \
             was...'. Do not include any other commentary or introductory text.",
            lang,
        )
    }

    pub fn chapter_illustration(&self, book: &str, chapter: &str, lang: Language) -> ImageRequest {
        let prompt = match lang {
            Language::Es => format!(
                "Una ilustración reverente de {book}, capítulo {chapter}, al estilo de un \
                 manuscrito iluminado."
            ),
            Language::En => format!(
                "A reverent illustration of {book}, chapter {chapter}, in the style of an \
                 illuminated manuscript."
            ),
        };
        self.image(prompt)
    }

    pub fn bible_search(&self, query: &str, lang: Language) -> ModelRequest {
        self.structured(
            format!("Search the Bible for the phrase: \"{query}\""),
            "You are a scripture search tool. Use the NABRE for English and Biblia de Jerusalén \
             Latinoamericana for Spanish. Return a JSON array of objects, where each object has \
             'reference' and 'text'. If no results are found, return an empty array.",
            lang,
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "reference": { "type": "STRING", "description": "The Bible reference for the verse (e.g., \"John 3:16\")." },
                        "text": { "type": "STRING", "description": "The full text of the verse." }
                    },
                    "required": ["reference", "text"]
                }
            }),
        )
    }

    pub fn gospel_of_the_day(&self, date_label: &str, lang: Language) -> ModelRequest {
        self.structured(
            format!("Provide the Gospel reading of the Catholic Mass for {date_label}."),
            "You are a Catholic lectionary. Give the Gospel reference and the full reading \
             text, one paragraph per line, with no commentary.",
            lang,
            json!({
                "type": "OBJECT",
                "properties": {
                    "reference": { "type": "STRING" },
                    "text": { "type": "STRING" }
                },
                "required": ["reference", "text"]
            }),
        )
    }

    pub fn ask_about_passage(&self, passage: &str, question: &str, lang: Language) -> ModelRequest {
        self.text(
            format!("Passage:\n\"{passage}\"\n\nQuestion: {question}"),
            "You are a Catholic Bible study companion. Answer the question about the given \
             passage faithfully to Catholic teaching, clearly and briefly.",
            lang,
        )
    }

    pub fn miracle_research(&self, query: &str, lang: Language) -> ModelRequest {
        ModelRequest {
            grounded_search: true,
            ..self.text(
                format!(
                    "Provide a detailed summary of the Eucharistic miracle of \"{query}\". \
                     Prioritize information from reliable Catholic sources."
                ),
                "You are a Catholic historian specializing in Eucharistic miracles. Your \
                 response should be a clear, factual summary. Use the grounding search results \
                 to formulate your answer.",
                lang,
            )
        }
    }

    pub fn chant_list(&self, lang: Language) -> ModelRequest {
        self.structured(
            "List well-known Gregorian chants and traditional Catholic hymns.".to_string(),
            "You are a Catholic music librarian. Return chants with their title and a \
             one-sentence description of their liturgical use.",
            lang,
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["title", "description"]
                }
            }),
        )
    }

    pub fn chant_lyrics(&self, title: &str, lang: Language) -> ModelRequest {
        self.text(
            format!("Provide the full lyrics of the chant \"{title}\"."),
            "You are a Catholic music librarian. Give the original text followed by a \
             translation, preserving line breaks. Do not add commentary.",
            lang,
        )
    }
}

fn saint_validation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isSaint": { "type": "BOOLEAN", "description": "True if the person is a recognized (canonized or beatified) Catholic Saint, false otherwise." },
            "reasoning": { "type": "STRING", "description": "A brief, one-sentence explanation for the decision." }
        },
        "required": ["isSaint", "reasoning"]
    })
}

fn saint_info_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "The full name of the saint, including titles like \"St.\"." },
            "feastDay": { "type": "STRING", "description": "The feast day of the saint (e.g., \"October 4\")." },
            "patronage": { "type": "ARRAY", "items": { "type": "STRING" } },
            "summary": { "type": "STRING" },
            "biography": { "type": "STRING" },
            "quotes": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["name", "feastDay", "patronage", "summary", "biography", "quotes"]
    })
}

#[cfg(test)]
mod tests {
    use super::PromptBook;
    use crate::model::language::Language;

    #[test]
    fn every_instruction_carries_the_language_sentence() {
        let prompts = PromptBook::default();
        let requests = [
            prompts.saint_validation("Francis", Language::Es),
            prompts.chapter_text("Genesis", "1", Language::Es),
            prompts.miracle_research("Lanciano", Language::Es),
        ];
        for request in requests {
            assert!(request
                .system_instruction
                .ends_with("All responses must be in Spanish."));
            assert_eq!(request.model, "gemini-2.5-flash");
        }
    }

    #[test]
    fn only_miracle_research_is_grounded() {
        let prompts = PromptBook::default();
        assert!(prompts.miracle_research("Lanciano", Language::En).grounded_search);
        assert!(!prompts.bible_search("love", Language::En).grounded_search);
        assert!(prompts.miracle_research("Lanciano", Language::En).response_schema.is_none());
    }

    #[test]
    fn portrait_prompt_follows_language() {
        let prompts = PromptBook::new("text-model", "image-model");
        let es = prompts.saint_portrait("Francisco", Language::Es);
        assert!(es.prompt.starts_with("Un retrato"));
        assert_eq!(es.model, "image-model");
        assert_eq!(es.aspect_ratio, "1:1");
        assert!(prompts
            .saint_portrait("Francis", Language::En)
            .prompt
            .contains("Saint Francis"));
    }
}
