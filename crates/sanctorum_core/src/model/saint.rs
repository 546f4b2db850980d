//! Saint records returned by structured model responses.

use serde::{Deserialize, Serialize};

/// Detailed profile of one saint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaintInfo {
    pub name: String,
    /// e.g. `October 4`.
    pub feast_day: String,
    #[serde(default)]
    pub patronage: Vec<String>,
    pub summary: String,
    pub biography: String,
    #[serde(default)]
    pub quotes: Vec<String>,
    /// `data:` URL of a generated portrait; filled in after the profile loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Answer to "is this name a recognized Catholic saint?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaintValidation {
    pub is_saint: bool,
    /// One sentence; shown to the user verbatim when `is_saint` is false.
    pub reasoning: String,
}

/// Saint celebrated on the current liturgical day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaintOfTheDay {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
