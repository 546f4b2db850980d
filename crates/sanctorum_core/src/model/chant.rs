//! Chant book records.

use serde::{Deserialize, Serialize};

/// Chant list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chant {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A chant opened for reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChantDetails {
    pub title: String,
    pub lyrics: String,
}
