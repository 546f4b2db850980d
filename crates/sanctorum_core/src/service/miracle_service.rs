//! Eucharistic miracle research.

use crate::client::{ModelClient, ModelRequest, ModelResponse};
use crate::model::language::Language;
use crate::model::miracle::EucharisticMiracle;
use crate::prompts::PromptBook;
use crate::service::{require_text, ServiceError, ServiceResult};
use log::info;

const RESEARCH_FAILED: &str = "An unexpected error occurred while researching the miracle.";
const NOT_FOUND: &str = "Could not retrieve information for this miracle. It may not be a recognized Eucharistic miracle.";

/// Featured miracles offered before any search.
pub const FEATURED_MIRACLES: &[&str] = &[
    "Lanciano",
    "Bolsena-Orvieto",
    "Santarém",
    "Buenos Aires",
    "Sokółka",
    "Legnica",
];

pub struct MiracleService<C: ModelClient> {
    client: C,
    prompts: PromptBook,
}

impl<C: ModelClient> MiracleService<C> {
    pub fn new(client: C, prompts: PromptBook) -> Self {
        Self { client, prompts }
    }

    pub fn prepare_research(&self, query: &str, lang: Language) -> ServiceResult<ModelRequest> {
        let query = require_text(query, "Miracle name")?;
        Ok(self.prompts.miracle_research(&query, lang))
    }

    /// Builds the result from a grounded answer.
    ///
    /// Sources missing a uri or title are dropped; an empty summary means the
    /// miracle is not recognized.
    pub fn interpret_research(&self, response: ModelResponse) -> ServiceResult<EucharisticMiracle> {
        let summary = response.text.trim();
        if summary.is_empty() {
            return Err(ServiceError::Rejected(NOT_FOUND.to_string()));
        }
        let sources = response
            .grounding_sources
            .into_iter()
            .filter(|source| source.is_complete())
            .collect();
        Ok(EucharisticMiracle {
            summary: summary.to_string(),
            sources,
        })
    }

    /// Summary plus cited web sources for a miracle.
    pub fn research(&self, query: &str, lang: Language) -> ServiceResult<EucharisticMiracle> {
        let request = self.prepare_research(query, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(RESEARCH_FAILED))?;
        let miracle = self.interpret_research(response)?;
        info!(
            "event=miracle_research module=service status=ok sources={}",
            miracle.sources.len()
        );
        Ok(miracle)
    }
}
