//! Response language selection.

use serde::{Deserialize, Serialize};

/// Language for prompts, responses and speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Stable short code (`en` / `es`).
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// BCP-47 locale handed to speech synthesis and recognition.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Es => "es-ES",
        }
    }

    /// Sentence appended to every system instruction.
    pub fn response_instruction(self) -> &'static str {
        match self {
            Self::En => "All responses must be in English.",
            Self::Es => "All responses must be in Spanish.",
        }
    }

    /// Parses a language code; anything other than `es` falls back to English.
    pub fn from_code(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "es" => Self::Es,
            _ => Self::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("ES"), Language::Es);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::Es.speech_locale(), "es-ES");
        assert!(Language::Es.response_instruction().contains("Spanish"));
    }
}
