//! Saint lookup service.
//!
//! # Responsibility
//! - Validate a name as a recognized saint before asking for a profile.
//! - Generate portraits and the saints-of-the-day list.
//!
//! # Invariants
//! - A profile request is only sent after validation answered `isSaint=true`.
//! - A negative validation surfaces the model's own reasoning verbatim.

use crate::client::{ImageRequest, ImageResponse, ModelClient, ModelRequest};
use crate::model::language::Language;
use crate::model::saint::{SaintInfo, SaintOfTheDay, SaintValidation};
use crate::prompts::PromptBook;
use crate::service::{parse_json, require_text, ServiceError, ServiceResult};
use log::{info, warn};

const LOOKUP_FAILED: &str = "An unexpected error occurred while fetching saint information.";
const PORTRAIT_FAILED: &str =
    "Failed to generate an image for the saint. This feature may be temporarily unavailable.";
const SAINTS_OF_THE_DAY_FAILED: &str = "Could not load today's saints. Please try again later.";

/// Saint profile use cases over a [`ModelClient`].
pub struct SaintService<C: ModelClient> {
    client: C,
    prompts: PromptBook,
}

impl<C: ModelClient> SaintService<C> {
    pub fn new(client: C, prompts: PromptBook) -> Self {
        Self { client, prompts }
    }

    /// Validation request for `name`.
    pub fn prepare_validation(&self, name: &str, lang: Language) -> ServiceResult<ModelRequest> {
        let name = require_text(name, "Saint name")?;
        Ok(self.prompts.saint_validation(&name, lang))
    }

    /// Interprets a validation answer; `Err(Rejected)` when not a saint.
    pub fn interpret_validation(&self, raw: &str) -> ServiceResult<()> {
        let validation: SaintValidation =
            parse_json(raw).map_err(ServiceError::invalid_response(LOOKUP_FAILED))?;
        if validation.is_saint {
            return Ok(());
        }
        let reasoning = validation.reasoning.trim();
        Err(ServiceError::Rejected(if reasoning.is_empty() {
            "This person is not a recognized Catholic Saint.".to_string()
        } else {
            reasoning.to_string()
        }))
    }

    pub fn prepare_detail(&self, name: &str, lang: Language) -> ServiceResult<ModelRequest> {
        let name = require_text(name, "Saint name")?;
        Ok(self.prompts.saint_detail(&name, lang))
    }

    pub fn interpret_detail(&self, raw: &str) -> ServiceResult<SaintInfo> {
        parse_json(raw).map_err(ServiceError::invalid_response(LOOKUP_FAILED))
    }

    /// Validates `name`, then fetches the full profile.
    pub fn lookup(&self, name: &str, lang: Language) -> ServiceResult<SaintInfo> {
        let validation_request = self.prepare_validation(name, lang)?;
        let validation = self
            .client
            .generate(&validation_request)
            .map_err(ServiceError::client(LOOKUP_FAILED))?;
        if let Err(err) = self.interpret_validation(&validation.text) {
            info!(
                "event=saint_lookup module=service status=rejected lang={}",
                lang.code()
            );
            return Err(err);
        }

        let detail_request = self.prepare_detail(name, lang)?;
        let detail = self
            .client
            .generate(&detail_request)
            .map_err(ServiceError::client(LOOKUP_FAILED))?;
        let info = self.interpret_detail(&detail.text)?;
        info!(
            "event=saint_lookup module=service status=ok lang={} quotes={}",
            lang.code(),
            info.quotes.len()
        );
        Ok(info)
    }

    pub fn prepare_portrait(&self, name: &str, lang: Language) -> ServiceResult<ImageRequest> {
        let name = require_text(name, "Saint name")?;
        Ok(self.prompts.saint_portrait(&name, lang))
    }

    /// Generates a portrait and returns it as a `data:` URL.
    pub fn portrait(&self, name: &str, lang: Language) -> ServiceResult<String> {
        let request = self.prepare_portrait(name, lang)?;
        let image = self.client.generate_image(&request).map_err(|err| {
            warn!("event=saint_portrait module=service status=error error={err}");
            ServiceError::client(PORTRAIT_FAILED)(err)
        })?;
        self.interpret_portrait(&image)
    }

    pub fn interpret_portrait(&self, image: &ImageResponse) -> ServiceResult<String> {
        if image.bytes_base64.trim().is_empty() {
            return Err(ServiceError::Rejected(PORTRAIT_FAILED.to_string()));
        }
        Ok(image.data_url())
    }

    /// Profile plus portrait; a failed portrait leaves `image_url` empty.
    pub fn lookup_with_portrait(&self, name: &str, lang: Language) -> ServiceResult<SaintInfo> {
        let mut info = self.lookup(name, lang)?;
        info.image_url = self.portrait(name, lang).ok();
        Ok(info)
    }

    pub fn prepare_saints_of_the_day(
        &self,
        date_label: &str,
        lang: Language,
    ) -> ServiceResult<ModelRequest> {
        let date_label = require_text(date_label, "Date")?;
        Ok(self.prompts.saints_of_the_day(&date_label, lang))
    }

    pub fn interpret_saints_of_the_day(&self, raw: &str) -> ServiceResult<Vec<SaintOfTheDay>> {
        let saints: Vec<SaintOfTheDay> =
            parse_json(raw).map_err(ServiceError::invalid_response(SAINTS_OF_THE_DAY_FAILED))?;
        Ok(saints
            .into_iter()
            .filter(|saint| !saint.name.trim().is_empty())
            .collect())
    }

    /// Saints celebrated on `date_label` (e.g. `October 4`).
    pub fn saints_of_the_day(
        &self,
        date_label: &str,
        lang: Language,
    ) -> ServiceResult<Vec<SaintOfTheDay>> {
        let request = self.prepare_saints_of_the_day(date_label, lang)?;
        let response = self
            .client
            .generate(&request)
            .map_err(ServiceError::client(SAINTS_OF_THE_DAY_FAILED))?;
        self.interpret_saints_of_the_day(&response.text)
    }
}
