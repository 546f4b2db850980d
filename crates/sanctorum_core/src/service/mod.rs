//! Model-backed use-case services.
//!
//! # Responsibility
//! - Turn user intents into model requests and typed results.
//! - Convert every failure into one user-visible message.
//!
//! # Invariants
//! - Blank input is rejected locally; no request is sent.
//! - Failures are never retried.
//! - Each service exposes `prepare_*`/`interpret_*` halves so a host that
//!   owns the transport reuses the same prompts and parsing.

use crate::client::ClientError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod chant_service;
pub mod miracle_service;
pub mod saint_service;
pub mod scripture_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failure; `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed local validation.
    InvalidInput(String),
    /// The model answered but declined the request (e.g. not a saint).
    Rejected(String),
    /// Transport failure, with the message to show for this feature.
    Client {
        message: &'static str,
        source: ClientError,
    },
    /// The model answered with content that does not match the schema.
    InvalidResponse {
        message: &'static str,
        detail: String,
    },
}

impl ServiceError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn client(message: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Client { message, source }
    }

    pub(crate) fn invalid_response(message: &'static str) -> impl FnOnce(String) -> Self {
        move |detail| Self::InvalidResponse { message, detail }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::Rejected(message) => write!(f, "{message}"),
            Self::Client { message, .. } => write!(f, "{message}"),
            Self::InvalidResponse { message, .. } => write!(f, "{message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parses a JSON model answer into `T`.
///
/// Tolerates surrounding whitespace and a Markdown code fence.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, String> {
    let trimmed = strip_code_fence(raw.trim());
    if trimmed.is_empty() {
        return Err("empty response".to_string());
    }
    serde_json::from_str(trimmed).map_err(|err| err.to_string())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Trims input and rejects it when blank.
pub(crate) fn require_text(value: &str, field: &'static str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty.")));
    }
    Ok(trimmed.to_string())
}
