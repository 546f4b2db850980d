//! Eucharistic miracle research results.

use serde::{Deserialize, Serialize};

/// Web source backing a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiracleSource {
    pub uri: String,
    pub title: String,
}

impl MiracleSource {
    /// Both `uri` and `title` are present.
    pub fn is_complete(&self) -> bool {
        !self.uri.trim().is_empty() && !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EucharisticMiracle {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<MiracleSource>,
}
