//! Contract for the hosted generative model.
//!
//! # Responsibility
//! - Describe text and image requests in a transport-neutral, serializable
//!   form so either Rust or the host app can execute them.
//! - Define the failure shape every transport maps into.
//!
//! # Invariants
//! - Core never retries; a failed request surfaces once.
//! - `ClientError` displays a human-readable message.

use crate::model::miracle::MiracleSource;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure reported by a model transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network or protocol failure.
    Transport(String),
    /// The service refused the request (quota, safety filter, bad key).
    Rejected(String),
    /// The service answered with no usable content.
    EmptyResponse,
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "model request failed: {message}"),
            Self::Rejected(message) => write!(f, "model request rejected: {message}"),
            Self::EmptyResponse => write!(f, "model returned an empty response"),
        }
    }
}

impl Error for ClientError {}

/// One text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRequest {
    pub model: String,
    /// User turn content.
    pub prompt: String,
    pub system_instruction: String,
    /// JSON schema the response must conform to; `None` means free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Ask the service to ground the answer with web search.
    #[serde(default)]
    pub grounded_search: bool,
}

impl ModelRequest {
    /// MIME type the transport should request.
    pub fn response_mime_type(&self) -> &'static str {
        if self.response_schema.is_some() {
            "application/json"
        } else {
            "text/plain"
        }
    }
}

/// Text-generation result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub text: String,
    /// Web sources attached by grounded search, in service order.
    #[serde(default)]
    pub grounding_sources: Vec<MiracleSource>,
}

impl ModelResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding_sources: Vec::new(),
        }
    }
}

/// One image-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    /// e.g. `1:1`.
    pub aspect_ratio: String,
    pub mime_type: String,
}

/// Generated image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub bytes_base64: String,
    pub mime_type: String,
}

impl ImageResponse {
    /// `data:` URL suitable for an image widget.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.bytes_base64)
    }
}

/// Transport to the hosted model.
///
/// Calls are blocking from the caller's point of view; hosts run them off the
/// UI thread.
pub trait ModelClient {
    fn generate(&self, request: &ModelRequest) -> ClientResult<ModelResponse>;
    fn generate_image(&self, request: &ImageRequest) -> ClientResult<ImageResponse>;
}

impl<C: ModelClient + ?Sized> ModelClient for &C {
    fn generate(&self, request: &ModelRequest) -> ClientResult<ModelResponse> {
        (**self).generate(request)
    }

    fn generate_image(&self, request: &ImageRequest) -> ClientResult<ImageResponse> {
        (**self).generate_image(request)
    }
}
